//! Passthrough factory configuration (byref.toml)
//!
//! ```toml
//! strategy = "frame-introspection"
//! layout = "fixed"
//! fixed_slots = 3
//! max_template_arity = 8
//! ```
//!
//! Every key is optional; omitted keys take the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::forward::{InvocationStrategy, SlotLayout, DEFAULT_MAX_TEMPLATE_ARITY, PACKED_ARITY_LIMIT};

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Which slots a passthrough declares, as spelled in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Mirror the target's parameter list
    #[default]
    Mirrored,
    /// `fixed_slots` generic by-reference slots
    Fixed,
    /// No declared slots
    Variadic,
}

/// Defaults applied by a [`PassthroughFactory`](crate::PassthroughFactory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassthroughConfig {
    /// Strategy used by `create_passthrough`
    #[serde(default)]
    pub strategy: InvocationStrategy,

    /// Slot layout used by `create_passthrough`
    #[serde(default)]
    pub layout: LayoutKind,

    /// Slot count for the fixed layout
    #[serde(default = "default_fixed_slots")]
    pub fixed_slots: usize,

    /// Largest arity handled by a packed template
    #[serde(default = "default_max_template_arity")]
    pub max_template_arity: usize,
}

fn default_fixed_slots() -> usize {
    3
}

fn default_max_template_arity() -> usize {
    DEFAULT_MAX_TEMPLATE_ARITY
}

impl Default for PassthroughConfig {
    fn default() -> Self {
        Self {
            strategy: InvocationStrategy::default(),
            layout: LayoutKind::default(),
            fixed_slots: default_fixed_slots(),
            max_template_arity: default_max_template_arity(),
        }
    }
}

impl PassthroughConfig {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PassthroughConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_template_arity == 0 || self.max_template_arity > PACKED_ARITY_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_template_arity must be between 1 and {}, got {}",
                PACKED_ARITY_LIMIT, self.max_template_arity
            )));
        }
        if self.layout == LayoutKind::Fixed && self.fixed_slots == 0 {
            return Err(ConfigError::ValidationError(
                "fixed layout needs at least one slot".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured slot layout
    pub fn slot_layout(&self) -> SlotLayout {
        match self.layout {
            LayoutKind::Mirrored => SlotLayout::Mirrored,
            LayoutKind::Fixed => SlotLayout::Fixed(self.fixed_slots),
            LayoutKind::Variadic => SlotLayout::Variadic,
        }
    }
}
