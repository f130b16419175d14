//! Plays a single game between two bots.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chess_core::{Color, Engine, Outcome, Position, Termination};
use serde::Serialize;
use tracing::{debug, info};

use crate::bots::Bot;
use crate::config::PlayConfig;
use crate::dispatch::{request_move, MoveSource, DEFAULT_GRACE};
use crate::error::PlayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

/// Why a recorded game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
    /// The move cap was reached with the game still going.
    MoveLimit,
}

impl From<Termination> for GameEnd {
    fn from(reason: Termination) -> Self {
        match reason {
            Termination::Checkmate => GameEnd::Checkmate,
            Termination::Stalemate => GameEnd::Stalemate,
            Termination::FiftyMoveRule => GameEnd::FiftyMoveRule,
            Termination::ThreefoldRepetition => GameEnd::ThreefoldRepetition,
            Termination::InsufficientMaterial => GameEnd::InsufficientMaterial,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayedMove {
    pub ply: u32,
    pub side: Side,
    /// Coordinate notation, e.g. `e2e4`.
    pub uci: String,
    pub source: MoveSource,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub start_fen: String,
    pub moves: Vec<PlayedMove>,
    /// `1-0`, `0-1`, `1/2-1/2`, or `*` when stopped by the move cap.
    pub result: String,
    pub end: GameEnd,
    pub final_fen: String,
}

impl GameRecord {
    pub fn to_json(&self) -> Result<String, PlayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlayError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| PlayError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn fallback_count(&self) -> usize {
        self.moves
            .iter()
            .filter(|played| played.source == MoveSource::Fallback)
            .count()
    }
}

/// Runs one game between two bots.
pub struct GameRunner {
    white: Bot,
    black: Bot,
    max_moves: u32,
    grace: Duration,
}

impl GameRunner {
    pub fn new(white: Bot, black: Bot) -> Self {
        Self {
            white,
            black,
            max_moves: 200,
            grace: DEFAULT_GRACE,
        }
    }

    pub fn from_config(config: &PlayConfig) -> Self {
        Self::new(Bot::from_spec(&config.white), Bot::from_spec(&config.black))
            .max_moves(config.game.max_moves)
            .grace(config.grace())
    }

    pub fn max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn white(&self) -> &Bot {
        &self.white
    }

    pub fn black(&self) -> &Bot {
        &self.black
    }

    pub async fn play(&mut self, start: Position) -> Result<GameRecord, PlayError> {
        self.play_with(start, |_| {}).await
    }

    /// Plays from `start` until the game ends or `max_moves` plies have been
    /// played, calling `on_move` after every ply.
    pub async fn play_with<F>(&mut self, start: Position, mut on_move: F) -> Result<GameRecord, PlayError>
    where
        F: FnMut(&PlayedMove),
    {
        self.white.new_game();
        self.black.new_game();

        let start_fen = start.to_fen();
        let mut pos = start;
        let mut moves = Vec::new();
        info!(white = self.white.name(), black = self.black.name(), fen = %start_fen, "game started");

        let end = loop {
            if let Some(reason) = pos.termination() {
                break GameEnd::from(reason);
            }
            if moves.len() as u32 >= self.max_moves {
                break GameEnd::MoveLimit;
            }

            let side = pos.side_to_move();
            let bot = match side {
                Color::White => &self.white,
                Color::Black => &self.black,
            };
            let Some(reply) = request_move(bot, &pos, bot.move_time(), self.grace).await else {
                break pos.termination().map_or(GameEnd::Stalemate, GameEnd::from);
            };

            pos.play(reply.mv)?;
            let played = PlayedMove {
                ply: moves.len() as u32 + 1,
                side: side.into(),
                uci: reply.mv.to_string(),
                source: reply.source,
                elapsed_ms: reply.elapsed.as_millis() as u64,
            };
            debug!(ply = played.ply, bot = bot.name(), mv = %played.uci, "move played");
            on_move(&played);
            moves.push(played);
        };

        let outcome = pos.outcome();
        let result = if end == GameEnd::MoveLimit {
            Outcome::Ongoing.result_str()
        } else {
            outcome.result_str()
        };
        info!(result, end = ?end, plies = moves.len(), "game over");

        Ok(GameRecord {
            white: self.white.name().to_string(),
            black: self.black.name().to_string(),
            start_fen,
            moves,
            result: result.to_string(),
            end,
            final_fen: pos.to_fen(),
        })
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod runner_tests;
