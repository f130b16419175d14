//! Engine configuration, loadable from TOML.
//!
//! ```toml
//! max_depth = 5
//! move_time_ms = 10000
//! profile = "aggressive"
//! tt_capacity = 1048576
//! quiescence_checks = false
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::EvalProfile;
use crate::tt::DEFAULT_CAPACITY;

/// Hard ceiling on iterative deepening.
pub const MAX_DEPTH: u8 = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid engine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_depth must be between 1 and {MAX_DEPTH}, got {0}")]
    InvalidDepth(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest iteration, in plies.
    pub max_depth: u8,
    /// Budget the game loop grants per move.
    pub move_time_ms: u64,
    pub profile: EvalProfile,
    /// Maximum transposition table entries.
    pub tt_capacity: usize,
    /// Search quiet checks at the first quiescence ply.
    pub quiescence_checks: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            move_time_ms: 5_000,
            profile: EvalProfile::Balanced,
            tt_capacity: DEFAULT_CAPACITY,
            quiescence_checks: false,
        }
    }
}

impl EngineConfig {
    /// Depth 3 within 5 seconds.
    pub fn quick() -> Self {
        Self {
            max_depth: 3,
            move_time_ms: 5_000,
            ..Self::default()
        }
    }

    /// Depth 5 within 10 seconds.
    pub fn strong() -> Self {
        Self {
            max_depth: 5,
            move_time_ms: 10_000,
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth(self.max_depth));
        }
        Ok(())
    }

    pub fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
