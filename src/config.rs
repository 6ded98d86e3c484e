//! Engine configuration loaded from TOML

use crate::constants::updates::{DEFAULT_MAX_UPDATES_PER_TICK, REDSTONE_DELAY};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Engine settings. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cap on block updates delivered per world tick; the rest stay queued
    pub max_updates_per_tick: usize,
    /// Delay in ticks of `Redstone` updates
    pub redstone_delay_ticks: u64,
    /// Deflate chunk payloads in saves
    pub compress_chunks: bool,
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_updates_per_tick: DEFAULT_MAX_UPDATES_PER_TICK,
            redstone_delay_ticks: REDSTONE_DELAY,
            compress_chunks: true,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded engine config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_updates_per_tick == 0 {
            return Err(ConfigError::Invalid {
                field: "max_updates_per_tick",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.redstone_delay_ticks == 0 {
            return Err(ConfigError::Invalid {
                field: "redstone_delay_ticks",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
