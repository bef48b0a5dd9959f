//! Error types for the rewrite step.

use thiserror::Error;

/// Errors raised by the generative rewrite step.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RewriteError {
    // === Service Errors ===
    /// The service could not be reached or did not answer in time.
    #[error("generative service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status.
    #[error("generative service returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid response from generative service: {0}")]
    InvalidResponse(String),

    /// Any other client-side failure (request building, TLS, redirects).
    #[error("generative client error: {0}")]
    Client(String),

    // === Configuration Errors ===
    /// Prompt template lacks the address placeholder.
    #[error("prompt template must contain {placeholder}")]
    InvalidTemplate {
        /// The required placeholder.
        placeholder: &'static str,
    },

    // === DataFrame Errors ===
    /// Source column not present in the table.
    #[error("column '{0}' not found in DataFrame")]
    ColumnNotFound(String),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(String),
}

impl RewriteError {
    /// Whether the failure means the service is unreachable.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<reqwest::Error> for RewriteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::Unavailable(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Client(err.to_string())
        }
    }
}

impl From<polars::prelude::PolarsError> for RewriteError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame(err.to_string())
    }
}

/// Result type alias for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable() {
        assert!(RewriteError::Unavailable("connection refused".to_string()).is_unavailable());
        assert!(
            !RewriteError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .is_unavailable()
        );
    }

    #[test]
    fn test_template_error_display() {
        let err = RewriteError::InvalidTemplate {
            placeholder: "{address}",
        };
        assert_eq!(err.to_string(), "prompt template must contain {address}");
    }
}
