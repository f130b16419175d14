pub mod attacks;
pub mod error;
pub mod perft;
pub mod position;
pub mod time_control;
pub mod types;

// Re-export the oracle surface (rules themselves live in cozy-chess)
pub use error::ChessError;
pub use perft::perft;
pub use position::*;
pub use time_control::*;
pub use types::*;

use std::time::Duration;

// =============================================================================
// Engine trait, implemented by every bot
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation score in centipawns from the side to move's perspective
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
    /// Whether search was stopped early due to time limit
    pub stopped: bool,
}

impl SearchResult {
    /// Result for a position with no legal moves.
    pub fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stopped: false,
        }
    }
}

/// Trait that all chess engines must implement.
///
/// The set of implementors is closed: the game loop wraps them in its `Bot`
/// enum rather than accepting arbitrary trait objects.
pub trait Engine: Send {
    /// Search the position with the given search limits.
    ///
    /// Must return `Some` move whenever the position has a legal move.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Best move within a wall-clock budget. `None` only when there is no legal move.
    fn best_move(&mut self, pos: &Position, budget: Duration) -> Option<Move> {
        self.search(pos, SearchLimits::time(budget)).best_move
    }

    /// Display label (identity and strength), for display only.
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) {}
}
