use thiserror::Error;

pub const USAGE: &str = "Usage: invoicegen <client> <start yyyy-mm-dd> <end yyyy-mm-dd>";

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid date {value:?} for <{arg}>. Use ISO format, e.g. 2025-03-01")]
    InvalidDate { arg: &'static str, value: String },

    #[error("{0}")]
    Invoice(#[from] invoicegen::Error),
}

impl AppError {
    /// Whether the usage line should follow the message.
    pub fn wants_usage(&self) -> bool {
        match self {
            AppError::InvalidDate { .. } => true,
            AppError::Invoice(e) => e.is_usage(),
        }
    }
}
