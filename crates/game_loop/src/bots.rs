//! The bots a game can be played with.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chess_core::{Engine, Position, SearchLimits, SearchResult};
use classical_engine::{ClassicalEngine, EngineConfig};
use random_engine::{NewbornEngine, RandomEngine};
use serde::{Deserialize, Serialize};

/// Budget for bots that answer without searching.
pub const INSTANT_BUDGET: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Newborn,
    Random,
    #[default]
    Minimax,
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BotKind::Newborn => "newborn",
            BotKind::Random => "random",
            BotKind::Minimax => "minimax",
        })
    }
}

impl FromStr for BotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newborn" => Ok(BotKind::Newborn),
            "random" => Ok(BotKind::Random),
            "minimax" => Ok(BotKind::Minimax),
            other => Err(format!("unknown bot '{other}' (expected newborn, random or minimax)")),
        }
    }
}

/// One side's bot as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotSpec {
    pub kind: BotKind,
    /// Only read by minimax.
    pub search: EngineConfig,
}

/// A playable bot.
///
/// Cloning a `Minimax` bot shares its transposition table with the clone.
#[derive(Debug, Clone)]
pub enum Bot {
    Newborn(NewbornEngine),
    Random(RandomEngine),
    Minimax(ClassicalEngine),
}

impl Bot {
    pub fn newborn() -> Self {
        Bot::Newborn(NewbornEngine::new())
    }

    pub fn random() -> Self {
        Bot::Random(RandomEngine::new())
    }

    pub fn minimax(config: EngineConfig) -> Self {
        Bot::Minimax(ClassicalEngine::with_config(config))
    }

    pub fn from_spec(spec: &BotSpec) -> Self {
        match spec.kind {
            BotKind::Newborn => Self::newborn(),
            BotKind::Random => Self::random(),
            BotKind::Minimax => Self::minimax(spec.search.clone()),
        }
    }

    pub fn kind(&self) -> BotKind {
        match self {
            Bot::Newborn(_) => BotKind::Newborn,
            Bot::Random(_) => BotKind::Random,
            Bot::Minimax(_) => BotKind::Minimax,
        }
    }

    /// Wall-clock budget granted per move.
    pub fn move_time(&self) -> Duration {
        match self {
            Bot::Minimax(engine) => engine.config().move_time(),
            Bot::Newborn(_) | Bot::Random(_) => INSTANT_BUDGET,
        }
    }
}

impl From<ClassicalEngine> for Bot {
    fn from(engine: ClassicalEngine) -> Self {
        Bot::Minimax(engine)
    }
}

impl Engine for Bot {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        match self {
            Bot::Newborn(engine) => engine.search(pos, limits),
            Bot::Random(engine) => engine.search(pos, limits),
            Bot::Minimax(engine) => engine.search(pos, limits),
        }
    }

    fn name(&self) -> &str {
        match self {
            Bot::Newborn(engine) => engine.name(),
            Bot::Random(engine) => engine.name(),
            Bot::Minimax(engine) => engine.name(),
        }
    }

    fn new_game(&mut self) {
        if let Bot::Minimax(engine) = self {
            engine.new_game();
        }
    }
}

#[cfg(test)]
#[path = "bots_tests.rs"]
mod bots_tests;
