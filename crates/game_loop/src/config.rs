//! Game settings, loadable from TOML.
//!
//! ```toml
//! [game]
//! fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! max_moves = 200
//! grace_ms = 500
//!
//! [white]
//! kind = "minimax"
//! search = { max_depth = 5, move_time_ms = 10000 }
//!
//! [black]
//! kind = "random"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use chess_core::{Position, STARTPOS_FEN};
use classical_engine::ConfigError;
use serde::{Deserialize, Serialize};

use crate::bots::BotSpec;
use crate::error::PlayError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub fen: String,
    /// Plies played before the game is stopped.
    pub max_moves: u32,
    pub grace_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            fen: STARTPOS_FEN.to_string(),
            max_moves: 200,
            grace_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub game: GameSettings,
    pub white: BotSpec,
    pub black: BotSpec,
}

impl PlayConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, PlayError> {
        let config: Self = toml::from_str(text).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlayError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), PlayError> {
        self.white.search.validate()?;
        self.black.search.validate()?;
        self.start_position()?;
        Ok(())
    }

    pub fn start_position(&self) -> Result<Position, PlayError> {
        Position::from_fen(&self.game.fen).map_err(PlayError::Fen)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.game.grace_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
