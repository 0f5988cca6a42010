//! Session store configuration.
//!
//! A `SessionConfig` is deserialized from TOML. Every key is optional:
//!
//! ```toml
//! # Sliding idle timeout. 0 disables expiry.
//! idle_timeout_secs = 1800
//! # Random bytes per session token, 16 to 256 (hex encoded, so twice as
//! # many chars).
//! token_bytes = 32
//! ```

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use stroke_contracts::error::{StrokeError, StrokeResult};

/// Smallest accepted token size: 128 bits.
pub const MIN_TOKEN_BYTES: usize = 16;
/// Largest accepted token size. Keeps a typo from turning the first login
/// into an unbounded allocation.
pub const MAX_TOKEN_BYTES: usize = 256;

pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
pub const DEFAULT_TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds a session may sit unused before `resolve` rejects it.
    /// `0` means sessions never expire.
    pub idle_timeout_secs: u64,

    /// Bytes of OS randomness per token, from `MIN_TOKEN_BYTES` to
    /// `MAX_TOKEN_BYTES`.
    pub token_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            token_bytes: DEFAULT_TOKEN_BYTES,
        }
    }
}

impl SessionConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `StrokeError::ConfigError` for malformed TOML, unknown keys,
    /// or out-of-range values.
    pub fn from_toml_str(s: &str) -> StrokeResult<Self> {
        let config: SessionConfig = toml::from_str(s).map_err(|e| StrokeError::ConfigError {
            reason: format!("failed to parse session config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> StrokeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| StrokeError::ConfigError {
            reason: format!("failed to read session config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> StrokeResult<()> {
        if !(MIN_TOKEN_BYTES..=MAX_TOKEN_BYTES).contains(&self.token_bytes) {
            return Err(StrokeError::ConfigError {
                reason: format!(
                    "token_bytes must be between {} and {} (got {})",
                    MIN_TOKEN_BYTES, MAX_TOKEN_BYTES, self.token_bytes
                ),
            });
        }
        self.idle_timeout_checked()?;
        Ok(())
    }

    /// The idle timeout, or `None` when expiry is disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_checked().ok().flatten()
    }

    fn idle_timeout_checked(&self) -> StrokeResult<Option<Duration>> {
        if self.idle_timeout_secs == 0 {
            return Ok(None);
        }
        i64::try_from(self.idle_timeout_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .map(Some)
            .ok_or_else(|| StrokeError::ConfigError {
                reason: format!("idle_timeout_secs {} is out of range", self.idle_timeout_secs),
            })
    }
}
