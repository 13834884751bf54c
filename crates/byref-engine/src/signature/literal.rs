//! Default-value literals
//!
//! A synthesized forwarder re-declares each optional parameter with the
//! target's default, so defaults are captured as literals that render back
//! to source form. Falsy literals (`false`, `0`, `0.0`, `''`, `[]`) are kept
//! as themselves; only an actual null renders as `null`.

use std::fmt;

use byref_sdk::Value;

/// A constant default that can be re-declared verbatim
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// Single-quoted string literal
    Str(String),
    /// Short array literal
    Array(Vec<Literal>),
}

impl Literal {
    /// Capture `value` as a literal.
    ///
    /// Returns `None` for values with no source form (callables, objects).
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(match value {
            Value::Null => Literal::Null,
            Value::Bool(b) => Literal::Bool(*b),
            Value::Int(i) => Literal::Int(*i),
            Value::Float(x) if x.is_finite() => Literal::Float(*x),
            Value::Str(s) => Literal::Str(s.clone()),
            Value::Array(items) => Literal::Array(
                items
                    .iter()
                    .map(Literal::from_value)
                    .collect::<Option<Vec<_>>>()?,
            ),
            Value::Float(_) | Value::Callable(_) | Value::Object(_) => return None,
        })
    }

    /// Materialize the literal as a value
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(*i),
            Literal::Float(x) => Value::Float(*x),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Array(items) => Value::Array(items.iter().map(Literal::to_value).collect()),
        }
    }

    /// Check if the literal is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part ("0.0", not "0")
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::Str(s) => write!(f, "'{}'", escape_single_quoted(s)),
            Literal::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Escape a string for a single-quoted literal
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out
}
