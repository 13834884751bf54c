//! Callable capability interface
//!
//! Passthroughs never look inside a target; they only ask it for its
//! parameter metadata, whether it returns by reference, and to run against a
//! bound [`ArgFrame`]. Free functions, bound methods and closures all provide
//! that capability through [`Callable`].

use std::fmt;
use std::sync::Arc;

use crate::error::{AbiResult, NativeError};
use crate::frame::ArgFrame;
use crate::types::ParameterInfo;
use crate::value::Value;

/// Body of a native function
pub type NativeFn = fn(&mut ArgFrame) -> AbiResult<Value>;

/// Body of a closure (may capture shared state)
pub type ClosureFn = Arc<dyn Fn(&mut ArgFrame) -> AbiResult<Value> + Send + Sync>;

/// What kind of callable a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    /// Free function
    Function,
    /// Method bound to a receiver
    BoundMethod,
    /// Anonymous function with captured state
    Closure,
}

/// Anything that can be introspected and invoked.
pub trait Callable: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> String;

    /// Kind of callable
    fn kind(&self) -> CallableKind;

    /// Declared parameters in order, or `None` when no metadata is available
    fn parameters(&self) -> Option<&[ParameterInfo]>;

    /// Whether the callable returns a reference
    fn returns_by_reference(&self) -> bool {
        false
    }

    /// Run the callable against bound arguments
    fn invoke_with_args(&self, frame: &mut ArgFrame) -> AbiResult<Value>;
}

// ============================================================================
// Free functions
// ============================================================================

/// A named free function with declared parameters
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    params: Vec<ParameterInfo>,
    returns_reference: bool,
    body: NativeFn,
}

impl NativeFunction {
    /// Create a function with no parameters declared yet
    pub fn new(name: impl Into<String>, body: NativeFn) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns_reference: false,
            body,
        }
    }

    /// Declare the next parameter
    pub fn with_param(mut self, param: ParameterInfo) -> Self {
        self.params.push(param);
        self
    }

    /// Declare that the function returns by reference
    pub fn returning_reference(mut self) -> Self {
        self.returns_reference = true;
        self
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Function
    }

    fn parameters(&self) -> Option<&[ParameterInfo]> {
        Some(&self.params)
    }

    fn returns_by_reference(&self) -> bool {
        self.returns_reference
    }

    fn invoke_with_args(&self, frame: &mut ArgFrame) -> AbiResult<Value> {
        (self.body)(frame)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}

// ============================================================================
// Closures
// ============================================================================

/// An anonymous function, possibly capturing shared state
#[derive(Clone)]
pub struct Closure {
    params: Vec<ParameterInfo>,
    returns_reference: bool,
    body: ClosureFn,
}

impl Closure {
    /// Create a closure with the given parameter list
    pub fn new(
        params: Vec<ParameterInfo>,
        body: impl Fn(&mut ArgFrame) -> AbiResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            params,
            returns_reference: false,
            body: Arc::new(body),
        }
    }

    /// Declare that the closure returns by reference
    pub fn returning_reference(mut self) -> Self {
        self.returns_reference = true;
        self
    }
}

impl Callable for Closure {
    fn name(&self) -> String {
        "{closure}".to_string()
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Closure
    }

    fn parameters(&self) -> Option<&[ParameterInfo]> {
        Some(&self.params)
    }

    fn returns_by_reference(&self) -> bool {
        self.returns_reference
    }

    fn invoke_with_args(&self, frame: &mut ArgFrame) -> AbiResult<Value> {
        (self.body)(frame)
    }
}

// ============================================================================
// Bound methods
// ============================================================================

/// An object whose methods can be bound and invoked by name
pub trait MethodReceiver: Send + Sync {
    /// Class name of the receiver
    fn class_name(&self) -> &str;

    /// Declared parameters of `method`, or `None` if there is no such method
    fn method_parameters(&self, method: &str) -> Option<&[ParameterInfo]>;

    /// Whether `method` returns by reference
    fn method_returns_by_reference(&self, _method: &str) -> bool {
        false
    }

    /// Dispatch `method` against bound arguments
    fn call_method(&self, method: &str, frame: &mut ArgFrame) -> AbiResult<Value>;
}

/// A `[receiver, method]` pair
#[derive(Clone)]
pub struct BoundMethod {
    receiver: Arc<dyn MethodReceiver>,
    method: String,
}

impl BoundMethod {
    /// Bind `method` on `receiver`
    pub fn new(receiver: Arc<dyn MethodReceiver>, method: impl Into<String>) -> Self {
        Self {
            receiver,
            method: method.into(),
        }
    }

    /// The receiver the method is bound to
    pub fn receiver(&self) -> &Arc<dyn MethodReceiver> {
        &self.receiver
    }

    /// The bound method name
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl Callable for BoundMethod {
    fn name(&self) -> String {
        format!("{}::{}", self.receiver.class_name(), self.method)
    }

    fn kind(&self) -> CallableKind {
        CallableKind::BoundMethod
    }

    fn parameters(&self) -> Option<&[ParameterInfo]> {
        self.receiver.method_parameters(&self.method)
    }

    fn returns_by_reference(&self) -> bool {
        self.receiver.method_returns_by_reference(&self.method)
    }

    fn invoke_with_args(&self, frame: &mut ArgFrame) -> AbiResult<Value> {
        if self.receiver.method_parameters(&self.method).is_none() {
            return Err(NativeError::UnknownMethod {
                class: self.receiver.class_name().to_string(),
                method: self.method.clone(),
            });
        }
        self.receiver.call_method(&self.method, frame)
    }
}

// ============================================================================
// Opaque callables
// ============================================================================

/// A callable that can run but exposes no parameter metadata
#[derive(Clone)]
pub struct OpaqueCallable {
    name: String,
    body: ClosureFn,
}

impl OpaqueCallable {
    /// Wrap `body` under `name`
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&mut ArgFrame) -> AbiResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }
}

impl Callable for OpaqueCallable {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> CallableKind {
        CallableKind::Function
    }

    fn parameters(&self) -> Option<&[ParameterInfo]> {
        None
    }

    fn invoke_with_args(&self, frame: &mut ArgFrame) -> AbiResult<Value> {
        (self.body)(frame)
    }
}
