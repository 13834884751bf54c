//! Signature descriptors
//!
//! A [`SignatureDescriptor`] is the introspected shape of a callable: its
//! ordered parameters (name, type constraint, by-reference flag, default)
//! and whether it returns by reference. Descriptors are immutable once
//! synthesized and render to a stable textual key:
//!
//! ```text
//! array &$items = [], callable $f, \Shape $s = null, $flag = false
//! ```
//!
//! The key doubles as the identity of the forwarder template generated for
//! the shape, named `Passthrough_<R|V><hex(key)>`.

mod literal;
mod synthesize;

use std::fmt;

use byref_sdk::TypeConstraint;

pub use literal::{escape_single_quoted, Literal};
pub use synthesize::synthesize;

/// Prefix of every forwarder name
pub const FORWARDER_NAME_PREFIX: &str = "Passthrough_";

/// One parameter of a synthesized signature
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name, unique within the signature
    pub name: String,
    /// Declared type constraint
    pub type_constraint: TypeConstraint,
    /// Whether the slot aliases the caller's storage
    pub by_reference: bool,
    /// Captured default literal
    pub default: Option<Literal>,
}

impl ParameterDescriptor {
    /// Check if the parameter declares a default
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Check if `null` is accepted regardless of the type constraint
    pub fn accepts_null(&self) -> bool {
        self.default.as_ref().is_some_and(Literal::is_null)
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_constraint {
            TypeConstraint::None => {}
            TypeConstraint::Array => f.write_str("array ")?,
            TypeConstraint::Callable => f.write_str("callable ")?,
            TypeConstraint::Named(class) => write!(f, "\\{} ", class)?,
        }
        if self.by_reference {
            f.write_str("&")?;
        }
        write!(f, "${}", self.name)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// Introspected shape of a callable
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureDescriptor {
    parameters: Vec<ParameterDescriptor>,
    returns_by_reference: bool,
}

impl SignatureDescriptor {
    /// Create a descriptor from already-validated parameters
    pub fn new(parameters: Vec<ParameterDescriptor>, returns_by_reference: bool) -> Self {
        Self {
            parameters,
            returns_by_reference,
        }
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Parameter at `index`
    pub fn parameter(&self, index: usize) -> Option<&ParameterDescriptor> {
        self.parameters.get(index)
    }

    /// Number of declared parameters
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the signature declares no parameters
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Whether the callable returns by reference
    pub fn returns_by_reference(&self) -> bool {
        self.returns_by_reference
    }

    /// Fewest arguments a positional call must supply
    pub fn required_count(&self) -> usize {
        self.parameters
            .iter()
            .rposition(|p| !p.has_default())
            .map_or(0, |last| last + 1)
    }

    /// Positions declared by reference
    pub fn by_ref_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.by_reference)
            .map(|(i, _)| i)
    }

    /// Stable textual key of the declared parameter list
    pub fn key(&self) -> String {
        self.parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name of the forwarder generated for this shape
    pub fn forwarder_name(&self) -> ForwarderName {
        ForwarderName {
            returns_by_reference: self.returns_by_reference,
            key: self.key(),
        }
    }
}

/// Reversible name of a forwarder template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForwarderName {
    returns_by_reference: bool,
    key: String,
}

impl ForwarderName {
    /// Decode a name produced by [`SignatureDescriptor::forwarder_name`]
    pub fn parse(name: &str) -> Option<Self> {
        let rest = name.strip_prefix(FORWARDER_NAME_PREFIX)?;
        let returns_by_reference = match rest.as_bytes().first()? {
            b'R' => true,
            b'V' => false,
            _ => return None,
        };
        let bytes = hex::decode(&rest[1..]).ok()?;
        let key = String::from_utf8(bytes).ok()?;
        Some(Self {
            returns_by_reference,
            key,
        })
    }

    /// Whether the named shape returns by reference
    pub fn returns_by_reference(&self) -> bool {
        self.returns_by_reference
    }

    /// The encoded parameter list
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for ForwarderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.returns_by_reference { 'R' } else { 'V' };
        write!(f, "{}{}{}", FORWARDER_NAME_PREFIX, marker, hex::encode(&self.key))
    }
}
