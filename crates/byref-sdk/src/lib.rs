//! Byref SDK - value model and callable capability interface
//!
//! This crate provides the minimal types a target callable needs to be
//! wrapped by a passthrough, without depending on the forwarding engine.
//!
//! # Example
//!
//! ```ignore
//! use byref_sdk::{ArgFrame, AbiResult, NativeFunction, ParameterInfo, Value};
//!
//! fn tag(frame: &mut ArgFrame) -> AbiResult<Value> {
//!     let tagged = format!("{}@", frame.get(0));
//!     frame.set(0, tagged.clone());
//!     Ok(Value::from(tagged))
//! }
//!
//! let f = NativeFunction::new("tag", tag)
//!     .with_param(ParameterInfo::new("subject").by_ref());
//! ```

#![warn(missing_docs)]

pub mod callable;
pub mod error;
pub mod frame;
pub mod types;
pub mod value;
pub mod var;

pub use callable::{
    BoundMethod, Callable, CallableKind, Closure, ClosureFn, MethodReceiver, NativeFn,
    NativeFunction, OpaqueCallable,
};
pub use error::{AbiResult, NativeError};
pub use frame::ArgFrame;
pub use types::{required_parameter_count, DefaultValue, ParameterInfo, TypeConstraint};
pub use value::{ObjectValue, Value};
pub use var::{Arg, Slot, VarRef};
