//! Passthroughs and the factory that builds them

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use byref_sdk::{Arg, Callable, Value};

use crate::config::PassthroughConfig;
use crate::error::{PassthroughError, PassthroughResult};
use crate::forward::{Forwarder, ForwarderTemplate, InvocationStrategy, SlotLayout};
use crate::registry::SignatureRegistry;
use crate::signature::{synthesize, ForwarderName, SignatureDescriptor};

/// A callable that forwards to one target with the target's own signature
pub struct Passthrough {
    target: Arc<dyn Callable>,
    forwarder: Forwarder,
}

impl Passthrough {
    /// Invoke the target with `args`
    pub fn invoke(&self, args: &[Arg]) -> PassthroughResult<Value> {
        self.forwarder.forward(self.target.as_ref(), args)
    }

    /// The wrapped target
    pub fn target(&self) -> &Arc<dyn Callable> {
        &self.target
    }

    /// The declared signature
    pub fn signature(&self) -> &SignatureDescriptor {
        self.forwarder.signature()
    }

    /// The shared forwarder template
    pub fn template(&self) -> &Arc<ForwarderTemplate> {
        self.forwarder.template()
    }

    /// Name of the forwarder template
    pub fn name(&self) -> &ForwarderName {
        self.forwarder.template().name()
    }

    /// Invocation strategy
    pub fn strategy(&self) -> InvocationStrategy {
        self.forwarder.strategy()
    }

    /// Declared slot layout
    pub fn layout(&self) -> SlotLayout {
        self.forwarder.layout()
    }
}

impl fmt::Debug for Passthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passthrough")
            .field("target", &self.target.name())
            .field("forwarder", &self.name().to_string())
            .field("strategy", &self.strategy())
            .field("layout", &self.layout())
            .finish()
    }
}

/// Builds passthroughs, sharing templates between identical signatures
#[derive(Debug, Default)]
pub struct PassthroughFactory {
    registry: SignatureRegistry,
    config: PassthroughConfig,
}

impl PassthroughFactory {
    /// Create a factory with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with `config`, rejecting out-of-range values
    pub fn with_config(config: PassthroughConfig) -> PassthroughResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: SignatureRegistry::with_max_template_arity(config.max_template_arity),
            config,
        })
    }

    /// Create a factory configured from a TOML file
    pub fn from_config_file(path: impl AsRef<Path>) -> PassthroughResult<Self> {
        Self::with_config(PassthroughConfig::load(path)?)
    }

    /// Active configuration
    pub fn config(&self) -> &PassthroughConfig {
        &self.config
    }

    /// The template registry
    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Wrap `target` using the configured strategy and layout
    pub fn create_passthrough(&self, target: Arc<dyn Callable>) -> PassthroughResult<Passthrough> {
        self.create_passthrough_with(target, self.config.strategy, self.config.slot_layout())
    }

    /// Wrap `target` with an explicit strategy and layout.
    ///
    /// Fails if the target's signature cannot be synthesized or if it returns
    /// by reference.
    pub fn create_passthrough_with(
        &self,
        target: Arc<dyn Callable>,
        strategy: InvocationStrategy,
        layout: SlotLayout,
    ) -> PassthroughResult<Passthrough> {
        let signature = synthesize(target.as_ref())?;
        if signature.returns_by_reference() {
            return Err(PassthroughError::UnsupportedReturnByReference {
                callable: target.name(),
            });
        }
        let template = self.registry.resolve(signature);
        Ok(Passthrough {
            target,
            forwarder: Forwarder::new(template, strategy, layout),
        })
    }
}
