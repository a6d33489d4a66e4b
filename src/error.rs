//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Separates argument validation, missing profiles, malformed YAML, and
//! output failures so callers can decide how to report each one.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Profile not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Amount out of range: {what}")]
    Overflow { what: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }

    pub fn overflow(what: impl Into<String>) -> Self {
        Error::Overflow { what: what.into() }
    }

    pub fn pdf<E: std::fmt::Display>(e: E) -> Self {
        Error::Pdf(e.to_string())
    }

    /// True for failures caused by what the user typed rather than by the data on disk.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}
