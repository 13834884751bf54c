//! Byref Engine
//!
//! Builds reference-preserving passthroughs: callables that mirror a
//! target's parameter list (arity, by-reference markers, defaults) and
//! forward every call to it.
//!
//! - [`signature`] synthesizes a [`SignatureDescriptor`] from callable
//!   metadata and renders its stable key and forwarder name
//! - [`registry`] shares one forwarder template per signature shape
//! - [`forward`] binds arguments and relays them with one of four
//!   [`InvocationStrategy`]s, only two of which keep by-reference aliasing
//! - [`passthrough`] ties the pieces together behind [`PassthroughFactory`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use byref_engine::PassthroughFactory;
//! use byref_sdk::{Arg, Closure, ParameterInfo, Value, VarRef};
//!
//! let target = Closure::new(vec![ParameterInfo::new("n").by_ref()], |frame| {
//!     let next = frame.get(0).expect_int()? + 1;
//!     frame.set(0, next);
//!     Ok(Value::Null)
//! });
//!
//! let factory = PassthroughFactory::new();
//! let passthrough = factory.create_passthrough(Arc::new(target))?;
//! let n = VarRef::new(41);
//! passthrough.invoke(&[Arg::var(&n)])?;
//! assert_eq!(n.get(), Value::Int(42));
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod forward;
pub mod passthrough;
pub mod registry;
pub mod signature;

pub use config::{ConfigError, LayoutKind, PassthroughConfig};
pub use error::{PassthroughError, PassthroughResult};
pub use forward::{forward, Forwarder, ForwarderTemplate, InvocationStrategy, SlotLayout};
pub use passthrough::{Passthrough, PassthroughFactory};
pub use registry::SignatureRegistry;
pub use signature::{synthesize, ForwarderName, Literal, ParameterDescriptor, SignatureDescriptor};
