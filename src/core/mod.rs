//! Core building blocks: slugs, totals, formatting, configuration, and the
//! backend-agnostic layout tree. These are pure primitives consumed by the
//! `io` writers and the high-level `api` module.
pub mod format;
pub mod layout;
pub mod metrics;
pub mod params;
pub mod slug;
pub mod totals;
