//! Error types for the Partial model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building breakpoints, partials, or envelopes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A breakpoint carries a value the model cannot represent.
    #[error("invalid breakpoint at {time} s: {message}")]
    InvalidBreakpoint {
        /// Time of the offending breakpoint.
        time: f64,
        /// What is wrong with it.
        message: String,
    },

    /// An envelope point is malformed.
    #[error("invalid envelope: {message}")]
    InvalidEnvelope {
        /// Error message.
        message: String,
    },
}

impl ModelError {
    /// Creates an invalid breakpoint error.
    pub fn invalid_breakpoint(time: f64, message: impl Into<String>) -> Self {
        Self::InvalidBreakpoint {
            time,
            message: message.into(),
        }
    }

    /// Creates an invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Returns a stable error code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidBreakpoint { .. } => "MODEL_001",
            ModelError::InvalidEnvelope { .. } => "MODEL_002",
        }
    }
}
