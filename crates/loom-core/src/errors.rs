//! Cross-cutting error types for Loom.
//!
//! Domain-specific errors (`DatabaseError`, `LlmError`) live in their own
//! crates. Each of them maps onto an [`ErrorCategory`] so callers can pick a
//! user-visible failure class without matching on every variant.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while parsing core values (enums, plan documents).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
        }
    }
}

/// User-visible failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotFound,
    Forbidden,
    Validation,
    Provider,
    InvalidAnalysis,
    Storage,
}

impl ErrorCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Forbidden => "forbidden",
            Self::Validation => "validation",
            Self::Provider => "provider",
            Self::InvalidAnalysis => "invalid_analysis",
            Self::Storage => "storage",
        }
    }

    /// Process exit code used by the CLI for this class.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::NotFound => 3,
            Self::Forbidden => 4,
            Self::Validation => 5,
            Self::Provider => 6,
            Self::InvalidAnalysis => 7,
            Self::Storage => 8,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
