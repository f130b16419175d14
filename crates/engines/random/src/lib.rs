//! Baseline bots that do not search.
//!
//! - [`RandomEngine`] picks uniformly among the legal moves. The game loop
//!   also uses it as the fallback when a searching bot misses its deadline.
//! - [`NewbornEngine`] always plays the first legal move in generator order.

use chess_core::{Engine, Move, Position, SearchLimits, SearchResult};
use rand::seq::SliceRandom;
use rand::thread_rng;


/// Uniformly random legal move, or `None` if there is none.
pub fn random_move(pos: &Position) -> Option<Move> {
    pos.legal_moves().choose(&mut thread_rng()).copied()
}

fn single_move_result(best_move: Option<Move>) -> SearchResult {
    SearchResult {
        best_move,
        score: 0,
        depth: 1,
        nodes: 1,
        stopped: false,
    }
}

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        single_move_result(random_move(pos))
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Plays the first legal move it is offered.
#[derive(Debug, Clone, Default)]
pub struct NewbornEngine;

impl NewbornEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for NewbornEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        single_move_result(pos.legal_moves().first().copied())
    }

    fn name(&self) -> &str {
        "Newborn"
    }
}
