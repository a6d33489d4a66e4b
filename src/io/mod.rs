//! I/O layer: the YAML profile `loader` and the `writers` that turn an
//! invoice into a PDF (plus an optional JSON sidecar) on disk.
pub mod loader;
pub use loader::{ProfileStore, load_invoice};

pub mod writers;
