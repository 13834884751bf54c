//! Forwarder templates and proxy frames
//!
//! A template is the signature-shaped part of a forwarder, shared by every
//! passthrough whose target has the same shape. Small arities use a packed
//! reference mask; larger ones fall back to a general per-slot table.
//!
//! A [`ProxyFrame`] is the proxy's active call frame after binding the
//! caller's arguments against its declared parameter list:
//!
//! ```text
//! declared slots (aliases or copies)  | overflow (copies)
//! ┌────────┬────────┬────────┐        ┌────────┬────────┐
//! │ &$a    │ $b     │ &$c    │        │ arg 3  │ arg 4  │
//! └────────┴────────┴────────┘        └────────┴────────┘
//! ```

use byref_sdk::{Arg, Slot, Value, VarRef};

use crate::signature::{ForwarderName, SignatureDescriptor};

/// Default largest arity handled by a packed template
pub const DEFAULT_MAX_TEMPLATE_ARITY: usize = 8;

/// Hard limit of the packed reference mask
pub const PACKED_ARITY_LIMIT: usize = u64::BITS as usize;

/// Which parameters a proxy declares in its own frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotLayout {
    /// Declare exactly the target's parameter list
    #[default]
    Mirrored,
    /// Declare `n` generic by-reference slots
    Fixed(usize),
    /// Declare nothing; every argument lands in the variadic tail
    Variadic,
}

/// Arity/reference-mask dispatch of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateShape {
    /// Packed form for small arities
    Packed {
        /// Number of declared parameters
        arity: usize,
        /// Bit `i` set when parameter `i` is by reference
        ref_mask: u64,
    },
    /// Per-slot table for everything else
    General {
        /// By-reference flag of each parameter
        by_ref: Box<[bool]>,
    },
}

impl TemplateShape {
    /// Pick the shape for `signature`
    pub fn for_signature(signature: &SignatureDescriptor, max_packed_arity: usize) -> Self {
        let flags = signature.parameters().iter().map(|p| p.by_reference);
        if signature.len() <= max_packed_arity.min(PACKED_ARITY_LIMIT) {
            let ref_mask = flags
                .enumerate()
                .filter(|(_, by_ref)| *by_ref)
                .fold(0u64, |mask, (i, _)| mask | (1u64 << i));
            TemplateShape::Packed {
                arity: signature.len(),
                ref_mask,
            }
        } else {
            TemplateShape::General {
                by_ref: flags.collect(),
            }
        }
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        match self {
            TemplateShape::Packed { arity, .. } => *arity,
            TemplateShape::General { by_ref } => by_ref.len(),
        }
    }

    /// By-reference flag of parameter `index`, or `None` past the arity
    #[inline]
    pub fn declares_by_ref(&self, index: usize) -> Option<bool> {
        match self {
            TemplateShape::Packed { arity, ref_mask } => {
                (index < *arity).then(|| ref_mask & (1u64 << index) != 0)
            }
            TemplateShape::General { by_ref } => by_ref.get(index).copied(),
        }
    }
}

/// Signature-shaped forwarder shared across passthroughs
#[derive(Debug)]
pub struct ForwarderTemplate {
    name: ForwarderName,
    signature: SignatureDescriptor,
    shape: TemplateShape,
}

impl ForwarderTemplate {
    /// Build the template for `signature`
    pub fn new(signature: SignatureDescriptor, max_packed_arity: usize) -> Self {
        Self {
            name: signature.forwarder_name(),
            shape: TemplateShape::for_signature(&signature, max_packed_arity),
            signature,
        }
    }

    /// Template name
    pub fn name(&self) -> &ForwarderName {
        &self.name
    }

    /// The signature the template declares
    pub fn signature(&self) -> &SignatureDescriptor {
        &self.signature
    }

    /// Dispatch shape
    pub fn shape(&self) -> &TemplateShape {
        &self.shape
    }

    /// Declared by-reference flag of position `index` under `layout`
    pub fn declared_slot(&self, layout: SlotLayout, index: usize) -> Option<bool> {
        match layout {
            SlotLayout::Mirrored => self.shape.declares_by_ref(index),
            SlotLayout::Fixed(count) => (index < count).then_some(true),
            SlotLayout::Variadic => None,
        }
    }
}

/// The proxy's active frame after binding caller arguments
#[derive(Debug, Clone, Default)]
pub struct ProxyFrame {
    declared: Vec<Slot>,
    overflow: Vec<Value>,
}

impl ProxyFrame {
    /// Bind `args` against the slots `template` declares under `layout`.
    ///
    /// A declared by-reference slot aliases a caller variable; given a
    /// literal it binds a fresh temporary that nobody else can observe.
    pub fn bind(template: &ForwarderTemplate, layout: SlotLayout, args: &[Arg]) -> Self {
        let mut frame = ProxyFrame {
            declared: Vec::with_capacity(args.len()),
            overflow: Vec::new(),
        };
        for (index, arg) in args.iter().enumerate() {
            match template.declared_slot(layout, index) {
                Some(true) => frame.declared.push(match arg {
                    Arg::Var(var) => Slot::Ref(var.clone()),
                    Arg::Literal(value) => Slot::Ref(VarRef::new(value.clone())),
                }),
                Some(false) => frame.declared.push(Slot::Value(arg.value())),
                None => frame.overflow.push(arg.value()),
            }
        }
        frame
    }

    /// Number of arguments bound to declared slots
    pub fn declared_len(&self) -> usize {
        self.declared.len()
    }

    /// Total number of bound arguments
    pub fn len(&self) -> usize {
        self.declared.len() + self.overflow.len()
    }

    /// Check if no arguments were bound
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variadic capture: a copy of every argument's current value
    pub fn collect_args(&self) -> Vec<Slot> {
        self.declared
            .iter()
            .map(Slot::get)
            .chain(self.overflow.iter().cloned())
            .map(Slot::Value)
            .collect()
    }

    /// Frame introspection: declared slots as bound, overflow as copies
    pub fn introspect(&self) -> Vec<Slot> {
        self.declared
            .iter()
            .cloned()
            .chain(self.overflow.iter().cloned().map(Slot::Value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::ParameterDescriptor;
    use byref_sdk::TypeConstraint;

    fn signature(by_ref: &[bool]) -> SignatureDescriptor {
        let params = by_ref
            .iter()
            .enumerate()
            .map(|(i, r)| ParameterDescriptor {
                name: format!("arg{}", i),
                type_constraint: TypeConstraint::None,
                by_reference: *r,
                default: None,
            })
            .collect();
        SignatureDescriptor::new(params, false)
    }

    #[test]
    fn test_packed_shape() {
        let shape = TemplateShape::for_signature(&signature(&[true, false, true]), 8);
        assert_eq!(
            shape,
            TemplateShape::Packed {
                arity: 3,
                ref_mask: 0b101
            }
        );
        assert_eq!(shape.declares_by_ref(0), Some(true));
        assert_eq!(shape.declares_by_ref(1), Some(false));
        assert_eq!(shape.declares_by_ref(3), None);
    }

    #[test]
    fn test_general_shape_past_limit() {
        let flags = [false, true, false];
        let shape = TemplateShape::for_signature(&signature(&flags), 2);
        assert!(matches!(shape, TemplateShape::General { .. }));
        assert_eq!(shape.arity(), 3);
        assert_eq!(shape.declares_by_ref(1), Some(true));
        assert_eq!(shape.declares_by_ref(3), None);
    }

    #[test]
    fn test_layouts_declare_slots() {
        let template = ForwarderTemplate::new(signature(&[true, false]), 8);
        assert_eq!(template.declared_slot(SlotLayout::Mirrored, 1), Some(false));
        assert_eq!(template.declared_slot(SlotLayout::Fixed(3), 1), Some(true));
        assert_eq!(template.declared_slot(SlotLayout::Fixed(3), 3), None);
        assert_eq!(template.declared_slot(SlotLayout::Variadic, 0), None);
    }

    #[test]
    fn test_bind_aliases_declared_refs() {
        let template = ForwarderTemplate::new(signature(&[true, false]), 8);
        let a = VarRef::new("one");
        let b = VarRef::new("two");
        let frame = ProxyFrame::bind(&template, SlotLayout::Mirrored, &[Arg::var(&a), Arg::var(&b)]);

        let mut slots = frame.introspect();
        assert!(slots[0].is_ref());
        assert!(!slots[1].is_ref());
        slots[0].set(Value::from("ONE"));
        assert_eq!(a.get(), Value::from("ONE"));

        let copies = frame.collect_args();
        assert!(copies.iter().all(|s| !s.is_ref()));
        assert_eq!(copies[0].get(), Value::from("ONE"));
    }

    #[test]
    fn test_bind_overflow_past_fixed_slots() {
        let template = ForwarderTemplate::new(signature(&[true, true, true, true]), 8);
        let vars: Vec<_> = (0..4).map(VarRef::new).collect();
        let args: Vec<_> = vars.iter().map(Arg::var).collect();
        let frame = ProxyFrame::bind(&template, SlotLayout::Fixed(3), &args);

        assert_eq!(frame.declared_len(), 3);
        assert_eq!(frame.len(), 4);
        let slots = frame.introspect();
        assert!(slots[2].is_ref());
        assert!(!slots[3].is_ref());
    }

    #[test]
    fn test_literal_in_ref_slot_gets_temporary() {
        let template = ForwarderTemplate::new(signature(&[true]), 8);
        let frame = ProxyFrame::bind(&template, SlotLayout::Mirrored, &[Arg::literal(5)]);
        let mut slots = frame.introspect();
        assert!(slots[0].is_ref());
        slots[0].set(Value::Int(6));
        assert_eq!(slots[0].get(), Value::Int(6));
    }
}
