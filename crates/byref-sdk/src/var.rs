//! Caller storage, call arguments and frame slots
//!
//! By-reference semantics are modelled with three small types:
//!
//! - [`VarRef`] is a caller's variable: shared storage that outlives a call.
//!   Cloning a `VarRef` produces an alias, not a copy.
//! - [`Arg`] is what a caller hands to a callable: either its variable or a
//!   bare literal with no storage behind it.
//! - [`Slot`] is one entry of a call frame: a private copy or an alias.
//!
//! A write through `Slot::Ref` is observed by every holder of the same
//! `VarRef`; a write to `Slot::Value` is confined to the frame.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::value::Value;

/// A caller-owned variable
#[derive(Clone)]
pub struct VarRef(Arc<Mutex<Value>>);

impl VarRef {
    /// Create a variable holding `value`
    pub fn new(value: impl Into<Value>) -> Self {
        Self(Arc::new(Mutex::new(value.into())))
    }

    /// Read the current value
    pub fn get(&self) -> Value {
        self.0.lock().clone()
    }

    /// Overwrite the current value
    pub fn set(&self, value: impl Into<Value>) {
        *self.0.lock() = value.into();
    }

    /// Overwrite the current value, returning the previous one
    pub fn replace(&self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut *self.0.lock(), value.into())
    }

    /// Check whether two handles name the same storage
    pub fn ptr_eq(&self, other: &VarRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for VarRef {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl fmt::Debug for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarRef({:?})", &*self.0.lock())
    }
}

/// An argument as supplied by a caller
#[derive(Debug, Clone)]
pub enum Arg {
    /// The caller's own variable (addressable)
    Var(VarRef),
    /// A temporary with no caller-visible storage
    Literal(Value),
}

impl Arg {
    /// Pass a variable
    pub fn var(var: &VarRef) -> Self {
        Arg::Var(var.clone())
    }

    /// Pass a literal
    pub fn literal(value: impl Into<Value>) -> Self {
        Arg::Literal(value.into())
    }

    /// Current value of the argument
    pub fn value(&self) -> Value {
        match self {
            Arg::Var(var) => var.get(),
            Arg::Literal(value) => value.clone(),
        }
    }

    /// The caller storage behind this argument, if any
    pub fn storage(&self) -> Option<&VarRef> {
        match self {
            Arg::Var(var) => Some(var),
            Arg::Literal(_) => None,
        }
    }
}

impl From<&VarRef> for Arg {
    fn from(var: &VarRef) -> Self {
        Arg::Var(var.clone())
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Literal(value)
    }
}

/// One entry of a call frame
#[derive(Debug, Clone)]
pub enum Slot {
    /// Private copy; writes stay inside the frame
    Value(Value),
    /// Alias of some storage; writes land in that storage
    Ref(VarRef),
}

impl Slot {
    /// Read the slot
    pub fn get(&self) -> Value {
        match self {
            Slot::Value(value) => value.clone(),
            Slot::Ref(var) => var.get(),
        }
    }

    /// Write the slot
    pub fn set(&mut self, value: Value) {
        match self {
            Slot::Value(current) => *current = value,
            Slot::Ref(var) => var.set(value),
        }
    }

    /// Check if the slot aliases storage
    pub fn is_ref(&self) -> bool {
        matches!(self, Slot::Ref(_))
    }

    /// Materialize a private copy of the slot's current value
    pub fn detach(self) -> Slot {
        match self {
            Slot::Ref(var) => Slot::Value(var.get()),
            copy => copy,
        }
    }
}
