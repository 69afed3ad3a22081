/*!
 * Pooled List Configuration
 */

use crate::core::env::env_usize;
use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{DEFAULT_POOL_CAPACITY, ENV_POOL_CAPACITY};
use serde::{Deserialize, Serialize};

/// Pooled list configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Slots per pool (default: 4096, floored at 2 by the list)
    pub capacity: usize,
}

impl PoolConfig {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `MEMARENA_POOL_CAPACITY`
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();
        if let Some(capacity) = env_usize(ENV_POOL_CAPACITY)? {
            config.capacity = capacity;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capacity".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
