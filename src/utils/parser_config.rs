//! Parser Configuration
//!
//! Limits that keep parsing bounded on hostile input:
//! - Maximum nesting depth (tuples and array suffixes)
//! - Maximum input length
//!
//! Presets cover the common cases; a JSON document can override either field.

use serde::{Deserialize, Serialize};

/// Parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting depth; each tuple and each array suffix is one level
    pub max_depth: usize,
    /// Maximum input length in bytes
    pub max_input_len: usize,
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_depth must be at least 1")]
    ZeroDepth,

    #[error("max_input_len must be at least 1")]
    ZeroInputLen,

    #[error("Invalid config JSON: {0}")]
    InvalidJson(String),
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

    /// Limits suitable for signatures from trusted sources
    pub fn standard() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_input_len: Self::DEFAULT_MAX_INPUT_LEN,
        }
    }

    /// Tighter limits for untrusted input
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            max_input_len: 4096,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Check that both limits allow at least some input
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_input_len == 0 {
            return Err(ConfigError::ZeroInputLen);
        }
        Ok(())
    }

    /// Load from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ParserConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::standard()
    }
}
