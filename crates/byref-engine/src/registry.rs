//! Signature registry
//!
//! Owns one [`ForwarderTemplate`] per distinct signature shape. Templates are
//! created on first request and kept for the registry's lifetime; lookups
//! take a shared lock and only a miss takes the exclusive one.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::forward::{ForwarderTemplate, DEFAULT_MAX_TEMPLATE_ARITY};
use crate::signature::{ForwarderName, SignatureDescriptor};

/// Registry of forwarder templates keyed by forwarder name
#[derive(Debug)]
pub struct SignatureRegistry {
    templates: RwLock<FxHashMap<ForwarderName, Arc<ForwarderTemplate>>>,
    max_template_arity: usize,
}

impl SignatureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::with_max_template_arity(DEFAULT_MAX_TEMPLATE_ARITY)
    }

    /// Create an empty registry with a custom packed-template limit
    pub fn with_max_template_arity(max_template_arity: usize) -> Self {
        Self {
            templates: RwLock::new(FxHashMap::default()),
            max_template_arity,
        }
    }

    /// Get the template for `signature`, synthesizing it on first request
    pub fn resolve(&self, signature: SignatureDescriptor) -> Arc<ForwarderTemplate> {
        let name = signature.forwarder_name();
        if let Some(template) = self.templates.read().get(&name) {
            trace!(forwarder = %name, "reusing forwarder template");
            return template.clone();
        }

        let mut templates = self.templates.write();
        templates
            .entry(name)
            .or_insert_with_key(|name| {
                debug!(
                    forwarder = %name,
                    arity = signature.len(),
                    "synthesized forwarder template"
                );
                Arc::new(ForwarderTemplate::new(signature, self.max_template_arity))
            })
            .clone()
    }

    /// Look up a template by name
    pub fn get(&self, name: &ForwarderName) -> Option<Arc<ForwarderTemplate>> {
        self.templates.read().get(name).cloned()
    }

    /// Look up a template by its rendered name
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ForwarderTemplate>> {
        ForwarderName::parse(name).and_then(|name| self.get(&name))
    }

    /// Check if a template exists for `signature`
    pub fn contains(&self, signature: &SignatureDescriptor) -> bool {
        self.templates
            .read()
            .contains_key(&signature.forwarder_name())
    }

    /// Names of every template
    pub fn names(&self) -> Vec<ForwarderName> {
        self.templates.read().keys().cloned().collect()
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }

    /// Largest arity handled by a packed template
    pub fn max_template_arity(&self) -> usize {
        self.max_template_arity
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
