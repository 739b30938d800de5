//! Decoder configuration types
//!
//! This module defines the small set of knobs the decoder library exposes.
//! Anything presentation-related (model dumps, reports) belongs to the
//! application layer.

use crate::types::{DecoderError, Result};
use serde::{Deserialize, Serialize};

/// What to do with a BIT()/GENMASK() macro that appears before any register
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Fail with a header format error
    #[default]
    Error,
    /// Skip the macro and keep parsing
    Ignore,
}

/// Configuration for the decoder library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Key preceding the register address in log lines (`addr = 0x...`)
    #[serde(default = "default_address_key")]
    pub address_key: String,

    /// Key preceding the register value in log lines (`val = 0x...`)
    #[serde(default = "default_value_key")]
    pub value_key: String,

    /// Handling of bit/mask macros with no parent register
    #[serde(default)]
    pub orphan_fields: OrphanPolicy,

    /// Strip leading/trailing whitespace from every input line
    #[serde(default = "default_true")]
    pub trim_lines: bool,

    /// Only match keys that start a word (`retval` then does not match `val`)
    #[serde(default)]
    pub whole_word_keys: bool,
}

fn default_address_key() -> String {
    "addr".to_string()
}

fn default_value_key() -> String {
    "val".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            address_key: default_address_key(),
            value_key: default_value_key(),
            orphan_fields: OrphanPolicy::default(),
            trim_lines: true,
            whole_word_keys: false,
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the address key
    pub fn with_address_key(mut self, key: impl Into<String>) -> Self {
        self.address_key = key.into();
        self
    }

    /// Builder method: set the value key
    pub fn with_value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = key.into();
        self
    }

    /// Builder method: set the orphan bit/mask policy
    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_fields = policy;
        self
    }

    /// Builder method: enable or disable line trimming
    pub fn with_trim_lines(mut self, enabled: bool) -> Self {
        self.trim_lines = enabled;
        self
    }

    /// Builder method: require keys to start a word
    pub fn with_whole_word_keys(mut self, enabled: bool) -> Self {
        self.whole_word_keys = enabled;
        self
    }

    /// Check that both keys are usable identifiers and distinct
    pub fn validate(&self) -> Result<()> {
        for key in [&self.address_key, &self.value_key] {
            if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(DecoderError::InvalidConfig(format!(
                    "log key '{}' must be a non-empty identifier",
                    key
                )));
            }
        }
        if self.address_key == self.value_key {
            return Err(DecoderError::InvalidConfig(format!(
                "address and value keys are both '{}'",
                self.address_key
            )));
        }
        Ok(())
    }
}
