/*!
 * Arena Configuration
 *
 * Chunk sizing and heap budget for the arena allocator.
 */

use crate::core::env::env_usize;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{ENV_MAX_UNITS, ENV_MIN_CHUNK_UNITS, MIN_CHUNK_UNITS};
use crate::core::types::Units;
use serde::{Deserialize, Serialize};

/// Arena allocator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Smallest chunk requested from the system allocator (default: 1024)
    pub min_chunk_units: Units,

    /// Total units the arena may claim (default: unlimited)
    pub max_units: Option<Units>,
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self {
            min_chunk_units: MIN_CHUNK_UNITS,
            max_units: None,
        }
    }

    pub fn with_min_chunk_units(mut self, units: Units) -> Self {
        self.min_chunk_units = units;
        self
    }

    pub fn with_max_units(mut self, units: Units) -> Self {
        self.max_units = Some(units);
        self
    }

    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `MEMARENA_MIN_CHUNK_UNITS` and `MEMARENA_MAX_UNITS`
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::new();
        if let Some(units) = env_usize(ENV_MIN_CHUNK_UNITS)? {
            config.min_chunk_units = units;
        }
        if let Some(units) = env_usize(ENV_MAX_UNITS)? {
            config.max_units = Some(units);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_chunk_units == 0 {
            return Err(ConfigError::InvalidValue {
                key: "min_chunk_units".to_string(),
                value: "0".to_string(),
            });
        }
        if self.max_units == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "max_units".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
