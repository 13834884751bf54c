//! Value - dynamically typed values carried through a forwarded call
//!
//! Every argument, default and return travelling between a caller, a
//! passthrough and its target is a `Value`. Scalars and strings are owned;
//! callables are shared handles.
//!
//! # String conversion
//!
//! `Display` follows the interpolation rules targets rely on when they build
//! strings out of their arguments:
//!
//! ```text
//! null  -> ""          true -> "1"        false -> ""
//! 42    -> "42"        1.5  -> "1.5"      "s"   -> "s"
//! [..]  -> "Array"     obj  -> class name callable -> "Closure"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::callable::Callable;
use crate::error::{AbiResult, NativeError};

/// A dynamically typed value
#[derive(Clone, Default)]
pub enum Value {
    /// The null value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Owned string
    Str(String),
    /// Ordered list of values
    Array(Vec<Value>),
    /// Shared handle to something invocable
    Callable(Arc<dyn Callable>),
    /// Instance of a named class
    Object(ObjectValue),
}

/// A class instance: a class name plus its named fields
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectValue {
    class_name: String,
    fields: BTreeMap<String, Value>,
}

impl ObjectValue {
    /// Create an instance of `class_name` with no fields set
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get the class name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get a field value
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a field value
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }
}

impl Value {
    /// Check if value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is an array
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if value is callable
    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Callable(_))
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow array elements
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the object payload
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the callable handle
    pub fn as_callable(&self) -> Option<&Arc<dyn Callable>> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Extract an integer or report a type mismatch
    pub fn expect_int(&self) -> AbiResult<i64> {
        self.as_int().ok_or_else(|| NativeError::TypeMismatch {
            expected: "int".to_string(),
            got: self.type_name().to_string(),
        })
    }

    /// Extract a string or report a type mismatch
    pub fn expect_str(&self) -> AbiResult<&str> {
        self.as_str().ok_or_else(|| NativeError::TypeMismatch {
            expected: "string".to_string(),
            got: self.type_name().to_string(),
        })
    }

    /// Get type name for diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Callable(_) => "callable",
            Value::Object(obj) => obj.class_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Value::Null"),
            Value::Bool(b) => write!(f, "Value::Bool({})", b),
            Value::Int(i) => write!(f, "Value::Int({})", i),
            Value::Float(x) => write!(f, "Value::Float({})", x),
            Value::Str(s) => write!(f, "Value::Str({:?})", s),
            Value::Array(items) => f.debug_tuple("Value::Array").field(items).finish(),
            Value::Callable(c) => write!(f, "Value::Callable({})", c.name()),
            Value::Object(obj) => f.debug_tuple("Value::Object").field(obj).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Array(_) => f.write_str("Array"),
            Value::Callable(_) => f.write_str("Closure"),
            Value::Object(obj) => f.write_str(obj.class_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ObjectValue> for Value {
    fn from(obj: ObjectValue) -> Self {
        Value::Object(obj)
    }
}

impl From<Arc<dyn Callable>> for Value {
    fn from(c: Arc<dyn Callable>) -> Self {
        Value::Callable(c)
    }
}
