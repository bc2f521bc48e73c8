//! Error types for the synthesis engine.

use thiserror::Error;

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Errors raised by the synthesizer, oscillator, and filter.
///
/// All of these are precondition violations detected before any sample is
/// written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    /// Bad construction or configuration parameter.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// The partial cannot be rendered.
    #[error("invalid partial: {message}")]
    InvalidPartial {
        /// Error message.
        message: String,
    },

    /// Malformed object, such as filter coefficients.
    #[error("invalid object: {message}")]
    InvalidObject {
        /// Error message.
        message: String,
    },
}

impl SynthError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid partial error.
    pub fn invalid_partial(message: impl Into<String>) -> Self {
        Self::InvalidPartial {
            message: message.into(),
        }
    }

    /// Creates an invalid object error.
    pub fn invalid_object(message: impl Into<String>) -> Self {
        Self::InvalidObject {
            message: message.into(),
        }
    }

    /// Returns a stable error code for diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            SynthError::InvalidArgument { .. } => "SYNTH_001",
            SynthError::InvalidPartial { .. } => "SYNTH_002",
            SynthError::InvalidObject { .. } => "SYNTH_003",
        }
    }
}
