//! Error types for address normalization.

use thiserror::Error;

/// Errors that can occur while building the engine or applying it to a table.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A rule term could not be compiled into a matcher.
    #[error("invalid pattern for term '{term}': {source}")]
    InvalidPattern {
        term: String,
        #[source]
        source: regex::Error,
    },

    /// Source column not present in the table.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for NormalizeError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
