//! Generation error types.

use loom_core::errors::ErrorCategory;
use thiserror::Error;

/// Errors from provider calls and the generation pipeline.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status code.
    #[error("provider API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call did not finish within the configured timeout.
    #[error("provider call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The response carried no completion text.
    #[error("provider returned no completion")]
    EmptyCompletion,

    /// The analysis response is not a JSON object.
    #[error("invalid analysis result: {0}")]
    InvalidAnalysisResult(String),
}

impl LlmError {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAnalysisResult(_) => ErrorCategory::InvalidAnalysis,
            Self::Http(_)
            | Self::Api { .. }
            | Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::EmptyCompletion => ErrorCategory::Provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_parse_failures_are_invalid_analysis() {
        assert_eq!(
            LlmError::InvalidAnalysisResult("[]".into()).category(),
            ErrorCategory::InvalidAnalysis
        );
        assert_eq!(LlmError::Timeout { secs: 5 }.category(), ErrorCategory::Provider);
        assert_eq!(LlmError::EmptyCompletion.category(), ErrorCategory::Provider);
    }
}
