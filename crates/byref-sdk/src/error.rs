//! Error types raised by callables behind the SDK boundary

/// Result type for callable invocations
pub type AbiResult<T> = Result<T, NativeError>;

/// Errors a callable reports while it runs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Bound method does not exist on the receiver
    #[error("Call to undefined method {class}::{method}()")]
    UnknownMethod {
        /// Receiver class name
        class: String,
        /// Requested method name
        method: String,
    },

    /// The callable raised an error of its own
    #[error("{0}")]
    Raised(String),
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::Raised(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::Raised(s.to_string())
    }
}
