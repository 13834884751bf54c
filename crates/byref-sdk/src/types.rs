//! Parameter metadata reported by callables
//!
//! This is the introspection contract a passthrough depends on: for every
//! parameter, in declaration order, its name, an optional type constraint,
//! whether it is passed by reference, and its default (if any).

use crate::value::Value;

/// Declared type constraint of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeConstraint {
    /// No constraint
    #[default]
    None,
    /// Array-like values only
    Array,
    /// Callable values only
    Callable,
    /// Instances of the named class only
    Named(String),
}

impl TypeConstraint {
    /// Check whether `value` satisfies the constraint
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            TypeConstraint::None => true,
            TypeConstraint::Array => value.is_array(),
            TypeConstraint::Callable => value.is_callable(),
            TypeConstraint::Named(class) => value
                .as_object()
                .is_some_and(|obj| obj.class_name() == class),
        }
    }

    /// Name used in diagnostics
    pub fn describe(&self) -> &str {
        match self {
            TypeConstraint::None => "mixed",
            TypeConstraint::Array => "array",
            TypeConstraint::Callable => "callable",
            TypeConstraint::Named(class) => class,
        }
    }
}

/// Default of an optional parameter
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A constant value that can be re-declared verbatim
    Literal(Value),
    /// An expression evaluated at call time (e.g. a named constant)
    Expression(String),
}

impl DefaultValue {
    /// The literal value, if this default is one
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            DefaultValue::Literal(value) => Some(value),
            DefaultValue::Expression(_) => None,
        }
    }
}

/// Metadata of one declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name (without sigil)
    pub name: String,
    /// Declared type constraint
    pub type_constraint: TypeConstraint,
    /// Whether the parameter aliases the caller's storage
    pub by_reference: bool,
    /// Default, when the parameter is optional
    pub default: Option<DefaultValue>,
}

impl ParameterInfo {
    /// A by-value, unconstrained, required parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_constraint: TypeConstraint::None,
            by_reference: false,
            default: None,
        }
    }

    /// Mark the parameter as passed by reference
    pub fn by_ref(mut self) -> Self {
        self.by_reference = true;
        self
    }

    /// Set the type constraint
    pub fn with_constraint(mut self, constraint: TypeConstraint) -> Self {
        self.type_constraint = constraint;
        self
    }

    /// Give the parameter a literal default
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Give the parameter a non-literal default expression
    pub fn with_default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Check if the parameter may be omitted
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }
}

/// Number of leading parameters a caller must supply
///
/// Parameters before the last required one count even if they declare a
/// default, since positional calls cannot skip them.
pub fn required_parameter_count(params: &[ParameterInfo]) -> usize {
    params
        .iter()
        .rposition(|p| !p.is_optional())
        .map_or(0, |last| last + 1)
}
