//! Command Line Interface (CLI) layer for invoicegen.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that validates the period, loads
//! the profiles, and writes the PDF through `invoicegen::api`.
//!
//! If you are embedding the generator into another application, prefer
//! the high-level `invoicegen::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use errors::USAGE;
pub use runner::run;
