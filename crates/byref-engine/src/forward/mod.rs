//! Passthrough forwarding
//!
//! A [`Forwarder`] couples a shared [`ForwarderTemplate`] with the two
//! construction-time choices of a passthrough: which slots its own frame
//! declares ([`SlotLayout`]) and how it collects and relays arguments
//! ([`InvocationStrategy`]).
//!
//! Forwarding a call:
//! 1. validate argument count and type constraints against the signature
//! 2. bind the caller's arguments into the proxy frame
//! 3. collect target arguments (copies, or the frame's declared slots)
//! 4. invoke the target directly or through reflection

mod invoke;
mod strategy;
mod template;

use std::sync::Arc;

use byref_sdk::{Arg, Callable, Value};
use tracing::trace;

use crate::error::{PassthroughError, PassthroughResult};
use crate::signature::SignatureDescriptor;

pub use invoke::{call_direct, Reflection};
pub use strategy::InvocationStrategy;
pub use template::{
    ForwarderTemplate, ProxyFrame, SlotLayout, TemplateShape, DEFAULT_MAX_TEMPLATE_ARITY,
    PACKED_ARITY_LIMIT,
};

/// A template plus the strategy and layout a passthrough was built with
#[derive(Debug, Clone)]
pub struct Forwarder {
    template: Arc<ForwarderTemplate>,
    strategy: InvocationStrategy,
    layout: SlotLayout,
}

impl Forwarder {
    /// Create a forwarder over a shared template
    pub fn new(
        template: Arc<ForwarderTemplate>,
        strategy: InvocationStrategy,
        layout: SlotLayout,
    ) -> Self {
        Self {
            template,
            strategy,
            layout,
        }
    }

    /// The shared template
    pub fn template(&self) -> &Arc<ForwarderTemplate> {
        &self.template
    }

    /// The declared signature
    pub fn signature(&self) -> &SignatureDescriptor {
        self.template.signature()
    }

    /// Invocation strategy
    pub fn strategy(&self) -> InvocationStrategy {
        self.strategy
    }

    /// Declared slot layout
    pub fn layout(&self) -> SlotLayout {
        self.layout
    }

    /// Forward `args` to `target`.
    ///
    /// Validation failures are reported before the target runs.
    pub fn forward(&self, target: &dyn Callable, args: &[Arg]) -> PassthroughResult<Value> {
        let signature = self.template.signature();
        check_arity(signature, args.len())?;
        check_types(signature, args)?;

        let reflection = if self.strategy.is_reflective() {
            Some(Reflection::of(target)?)
        } else {
            None
        };

        let frame = ProxyFrame::bind(&self.template, self.layout, args);
        let slots = if self.strategy.reads_frame() {
            frame.introspect()
        } else {
            frame.collect_args()
        };

        trace!(
            forwarder = %self.template.name(),
            strategy = %self.strategy,
            declared = frame.declared_len(),
            args = slots.len(),
            "forwarding call"
        );

        match reflection {
            Some(reflection) => reflection.invoke_args(slots),
            None => call_direct(target, slots),
        }
    }
}

/// Forward `args` to `target` through a one-off mirrored forwarder for
/// `signature`.
pub fn forward(
    signature: &SignatureDescriptor,
    target: &dyn Callable,
    args: &[Arg],
    strategy: InvocationStrategy,
) -> PassthroughResult<Value> {
    let template = ForwarderTemplate::new(signature.clone(), DEFAULT_MAX_TEMPLATE_ARITY);
    Forwarder::new(Arc::new(template), strategy, SlotLayout::Mirrored).forward(target, args)
}

fn check_arity(signature: &SignatureDescriptor, got: usize) -> PassthroughResult<()> {
    let min = signature.required_count();
    let max = signature.len();
    if got < min || got > max {
        return Err(PassthroughError::ArityMismatch { min, max, got });
    }
    Ok(())
}

fn check_types(signature: &SignatureDescriptor, args: &[Arg]) -> PassthroughResult<()> {
    for (position, (param, arg)) in signature.parameters().iter().zip(args).enumerate() {
        let value = arg.value();
        if param.type_constraint.admits(&value) || (value.is_null() && param.accepts_null()) {
            continue;
        }
        return Err(PassthroughError::ArgumentType {
            position,
            name: param.name.clone(),
            expected: param.type_constraint.describe().to_string(),
            got: value.type_name().to_string(),
        });
    }
    Ok(())
}
