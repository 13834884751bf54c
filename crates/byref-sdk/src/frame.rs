//! ArgFrame - a callable's view of the arguments it was invoked with

use crate::types::{DefaultValue, ParameterInfo};
use crate::value::Value;
use crate::var::Slot;

/// Arguments bound for one invocation of a callable.
///
/// Positions that were supplied hold a [`Slot`]; positions that were omitted
/// read as the callable's declared default (or null). Writing an omitted
/// position materializes a private slot for it.
#[derive(Debug, Clone, Default)]
pub struct ArgFrame {
    slots: Vec<Slot>,
    defaults: Vec<Option<Value>>,
}

impl ArgFrame {
    /// Frame over raw slots, with no parameter metadata applied
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            defaults: Vec::new(),
        }
    }

    /// Bind `slots` against a callable's declared parameters.
    ///
    /// A slot landing on a by-value parameter is detached into a private
    /// copy, so only by-reference parameters can write back to the caller.
    pub fn bind(params: &[ParameterInfo], slots: Vec<Slot>) -> Self {
        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match params.get(index) {
                Some(param) if param.by_reference => slot,
                _ => slot.detach(),
            })
            .collect();
        let defaults = params
            .iter()
            .map(|p| p.default.as_ref().and_then(DefaultValue::as_literal).cloned())
            .collect();
        Self { slots, defaults }
    }

    /// Number of supplied arguments
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no arguments were supplied
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read argument `index`
    pub fn get(&self, index: usize) -> Value {
        match self.slots.get(index) {
            Some(slot) => slot.get(),
            None => self.default_at(index),
        }
    }

    /// Write argument `index`
    pub fn set(&mut self, index: usize, value: impl Into<Value>) {
        while self.slots.len() <= index {
            let fill = self.default_at(self.slots.len());
            self.slots.push(Slot::Value(fill));
        }
        self.slots[index].set(value.into());
    }

    /// Check if argument `index` aliases caller storage
    pub fn is_aliased(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_ref)
    }

    /// Copies of every supplied argument
    pub fn args(&self) -> Vec<Value> {
        self.slots.iter().map(Slot::get).collect()
    }

    fn default_at(&self, index: usize) -> Value {
        self.defaults
            .get(index)
            .cloned()
            .flatten()
            .unwrap_or_default()
    }
}
