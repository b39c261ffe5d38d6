//! Error types for complex scaling.
//!
//! The numeric kernel itself never fails. Every safe entry point validates
//! its arguments against the buffer it was handed before the first write, and
//! reports a `CscalError` instead of touching memory out of range.

use thiserror::Error;

/// Custom error type for scaling, memory and view operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CscalError {
    /// A computed index (complex element or byte) falls outside the buffer
    #[error("Index out of bounds: {index} is outside a buffer of length {len}")]
    OutOfBounds { index: i64, len: usize },

    /// Arguments that can never describe a valid access pattern
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An interleaved buffer that cannot hold whole complex numbers
    #[error("Interleaved buffer has an odd number of floats ({len})")]
    Misaligned { len: usize },

    /// Linear memory configured with impossible page limits
    #[error("Invalid memory configuration: {message}")]
    InvalidMemoryConfig { message: String },

    /// Growth past the configured maximum
    #[error("Memory limit exceeded: requested {requested} pages, maximum is {maximum}")]
    MemoryLimitExceeded { requested: u64, maximum: u32 },

    /// Routine module called before `initialize`
    #[error("Module has not been initialized")]
    NotInitialized,
}

impl CscalError {
    /// Create an OutOfBounds error
    pub fn out_of_bounds(index: i64, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }

    /// Create an InvalidArgument error with a message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an InvalidMemoryConfig error with a message
    pub fn invalid_memory_config(message: impl Into<String>) -> Self {
        Self::InvalidMemoryConfig {
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::InvalidArgument { message } => Self::InvalidArgument {
                message: format!("{}: {}", context.into(), message),
            },
            Self::InvalidMemoryConfig { message } => Self::InvalidMemoryConfig {
                message: format!("{}: {}", context.into(), message),
            },
            other => other,
        }
    }
}

// Type alias for Result using CscalError
pub type Result<T> = std::result::Result<T, CscalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_error() {
        let error = CscalError::out_of_bounds(7, 5);
        assert!(matches!(error, CscalError::OutOfBounds { index: 7, len: 5 }));
        assert!(error.to_string().contains("out of bounds"));
        assert!(error.to_string().contains("7 is outside a buffer of length 5"));
    }

    #[test]
    fn test_invalid_argument_with_context() {
        let error = CscalError::invalid_argument("stride overflows").with_context("cscal");
        assert_eq!(error.to_string(), "Invalid argument: cscal: stride overflows");
    }

    #[test]
    fn test_context_leaves_structured_errors_alone() {
        let error = CscalError::NotInitialized.with_context("ndarray");
        assert_eq!(error, CscalError::NotInitialized);
    }
}
