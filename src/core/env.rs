/*!
 * Environment Overrides
 * Reading numeric settings from environment variables
 */

use super::errors::{ConfigError, ConfigResult};

/// Read `key` as an unsigned integer; `Ok(None)` when unset
pub fn env_usize(key: &str) -> ConfigResult<Option<usize>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        Err(_) => Ok(None),
    }
}

/// Read `key` as a boolean flag (`1` or `true`)
pub fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
