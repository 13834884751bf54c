//! Invocation strategies
//!
//! | Strategy                       | Target args from        | Aliasing kept |
//! |--------------------------------|-------------------------|---------------|
//! | `Generic`                      | copied variadic capture | no            |
//! | `Reflective`                   | copied variadic capture | no            |
//! | `FrameIntrospection`           | declared frame slots    | yes           |
//! | `ReflectiveFrameIntrospection` | declared frame slots    | yes           |
//!
//! Aliasing survives only where the proxy's own frame declares a
//! by-reference slot; the downstream invocation mechanism cannot restore an
//! alias that was copied away at collection time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a forwarder collects its arguments and invokes the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvocationStrategy {
    /// Copy every argument into a generic list, call directly
    Generic,
    /// Copy every argument into a generic list, call through reflection
    Reflective,
    /// Read the declared slots of the active frame, call directly
    FrameIntrospection,
    /// Read the declared slots of the active frame, call through reflection
    #[default]
    ReflectiveFrameIntrospection,
}

impl InvocationStrategy {
    /// Every strategy, in table order
    pub const ALL: [InvocationStrategy; 4] = [
        InvocationStrategy::Generic,
        InvocationStrategy::Reflective,
        InvocationStrategy::FrameIntrospection,
        InvocationStrategy::ReflectiveFrameIntrospection,
    ];

    /// Whether arguments are read from the frame's declared slots
    #[inline]
    pub fn reads_frame(self) -> bool {
        matches!(
            self,
            InvocationStrategy::FrameIntrospection
                | InvocationStrategy::ReflectiveFrameIntrospection
        )
    }

    /// Whether the target is invoked through reflection
    #[inline]
    pub fn is_reflective(self) -> bool {
        matches!(
            self,
            InvocationStrategy::Reflective | InvocationStrategy::ReflectiveFrameIntrospection
        )
    }

    /// Whether by-reference writes by the target reach the caller
    #[inline]
    pub fn preserves_aliasing(self) -> bool {
        self.reads_frame()
    }

    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            InvocationStrategy::Generic => "generic",
            InvocationStrategy::Reflective => "reflective",
            InvocationStrategy::FrameIntrospection => "frame-introspection",
            InvocationStrategy::ReflectiveFrameIntrospection => "reflective-frame-introspection",
        }
    }
}

impl fmt::Display for InvocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliasing_matrix() {
        let preserving: Vec<_> = InvocationStrategy::ALL
            .iter()
            .filter(|s| s.preserves_aliasing())
            .copied()
            .collect();
        assert_eq!(
            preserving,
            vec![
                InvocationStrategy::FrameIntrospection,
                InvocationStrategy::ReflectiveFrameIntrospection
            ]
        );
    }

    #[test]
    fn test_reflective_flags() {
        assert!(!InvocationStrategy::Generic.is_reflective());
        assert!(InvocationStrategy::Reflective.is_reflective());
        assert!(!InvocationStrategy::FrameIntrospection.is_reflective());
        assert!(InvocationStrategy::ReflectiveFrameIntrospection.is_reflective());
    }

    #[test]
    fn test_as_str() {
        assert_eq!(InvocationStrategy::Generic.to_string(), "generic");
        assert_eq!(
            InvocationStrategy::default().as_str(),
            "reflective-frame-introspection"
        );
    }
}
