//! Error types for the grid-insight library.
//!
//! The analysis operations themselves are total over well-formed grids and never
//! fail. Errors only surface at the edges: loading a grid from untrusted JSON,
//! validating configuration, serializing or formatting results and installing a
//! log subscriber.

use thiserror::Error;

/// Result type for fallible grid-insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Errors that can occur around an analysis run.
#[derive(Error, Debug)]
pub enum InsightError {
    /// The input is not a sequence of rows.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An analysis configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Writing a formatted report failed.
    #[error("Formatting failed: {0}")]
    Formatting(#[from] std::fmt::Error),
}

impl InsightError {
    /// Creates an invalid grid error with the given message.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a logging setup error with the given message.
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
