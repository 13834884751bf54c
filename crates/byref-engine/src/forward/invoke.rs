//! Direct and reflective invocation of a target
//!
//! Both mechanisms bind the forwarded slots against the target's own
//! declared parameters, so a slot landing on a by-value parameter is always
//! detached. Neither can turn a copied slot back into an alias.

use byref_sdk::{required_parameter_count, ArgFrame, Callable, CallableKind, ParameterInfo, Slot, Value};

use crate::error::{PassthroughError, PassthroughResult};

/// Call `target` with `slots` as its argument list.
///
/// Targets without metadata receive the slots unchanged.
pub fn call_direct(target: &dyn Callable, slots: Vec<Slot>) -> PassthroughResult<Value> {
    let mut frame = match target.parameters() {
        Some(params) => ArgFrame::bind(params, slots),
        None => ArgFrame::new(slots),
    };
    Ok(target.invoke_with_args(&mut frame)?)
}

/// Reflection handle over a callable
pub struct Reflection<'a> {
    target: &'a dyn Callable,
    parameters: &'a [ParameterInfo],
}

impl<'a> Reflection<'a> {
    /// Reflect on `target`; fails when it exposes no metadata
    pub fn of(target: &'a dyn Callable) -> PassthroughResult<Self> {
        let parameters = target
            .parameters()
            .ok_or_else(|| PassthroughError::Introspection {
                callable: target.name(),
                reason: "cannot reflect on a callable without parameter metadata".to_string(),
            })?;
        Ok(Self { target, parameters })
    }

    /// Kind of the reflected callable
    pub fn kind(&self) -> CallableKind {
        self.target.kind()
    }

    /// Declared parameters
    pub fn parameters(&self) -> &'a [ParameterInfo] {
        self.parameters
    }

    /// Fewest arguments an invocation must supply
    pub fn required_parameter_count(&self) -> usize {
        required_parameter_count(self.parameters)
    }

    /// Invoke with an argument list; slots that alias storage stay aliased
    /// for by-reference parameters.
    pub fn invoke_args(&self, slots: Vec<Slot>) -> PassthroughResult<Value> {
        let required = self.required_parameter_count();
        if slots.len() < required {
            return Err(PassthroughError::ArityMismatch {
                min: required,
                max: self.parameters.len(),
                got: slots.len(),
            });
        }
        let mut frame = ArgFrame::bind(self.parameters, slots);
        Ok(self.target.invoke_with_args(&mut frame)?)
    }
}
