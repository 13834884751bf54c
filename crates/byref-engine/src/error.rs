//! Passthrough error types.

use byref_sdk::NativeError;

use crate::config::ConfigError;

/// Result type for signature synthesis and forwarding
pub type PassthroughResult<T> = Result<T, PassthroughError>;

/// Errors raised while building or invoking a passthrough.
///
/// Every variant except `Target` is raised before the target runs.
#[derive(Debug, thiserror::Error)]
pub enum PassthroughError {
    /// The target's signature cannot be recovered
    #[error("Cannot introspect {callable}: {reason}")]
    Introspection {
        /// Name of the callable
        callable: String,
        /// What could not be recovered
        reason: String,
    },

    /// Wrong number of arguments supplied at invoke time
    #[error("Arity mismatch: expected {}, got {got}", expected_range(.min, .max))]
    ArityMismatch {
        /// Fewest arguments accepted
        min: usize,
        /// Most arguments accepted
        max: usize,
        /// Arguments supplied
        got: usize,
    },

    /// An argument violates its parameter's type constraint
    #[error("Argument {position} (${name}) must be {expected}, {got} given")]
    ArgumentType {
        /// Zero-based argument position
        position: usize,
        /// Parameter name
        name: String,
        /// Constraint description
        expected: String,
        /// Type of the supplied value
        got: String,
    },

    /// Target returns by reference, which forwarding does not support
    #[error("{callable} returns by reference; forwarding reference returns is not supported")]
    UnsupportedReturnByReference {
        /// Name of the callable
        callable: String,
    },

    /// The target itself failed
    #[error("Target error: {0}")]
    Target(#[from] NativeError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

fn expected_range(min: &usize, max: &usize) -> String {
    if min == max {
        min.to_string()
    } else {
        format!("{}..={}", min, max)
    }
}
