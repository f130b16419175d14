//! Classical Chess Engine
//!
//! Iterative-deepening negamax with alpha-beta pruning, a transposition
//! table shared between calls, capture/check/killer move ordering,
//! quiescence search and a composite hand-written evaluation.

pub mod config;
pub mod eval;
pub mod ordering;
pub mod search;
pub mod tt;

use std::sync::Arc;

use chess_core::{Engine, Position, SearchLimits, SearchResult};

pub use config::{ConfigError, EngineConfig, MAX_DEPTH};
pub use eval::{piece_value, EvalBreakdown, EvalProfile, Evaluator, Score, INFINITY, MATE};
pub use search::{terminal_score, Searcher};
pub use tt::{Bound, TranspositionTable, TtEntry};

/// Classical chess engine using negamax with alpha-beta pruning.
///
/// Clones share one transposition table, so a cloned engine handed to a
/// worker thread keeps benefiting from earlier searches.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    name: String,
    config: EngineConfig,
    evaluator: Evaluator,
    tt: Arc<TranspositionTable>,
    /// Node counter of the last search, for statistics
    nodes: u64,
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let tt = Arc::new(TranspositionTable::with_capacity(config.tt_capacity));
        Self::with_table(config, tt)
    }

    /// Engine that searches into an existing table.
    pub fn with_table(config: EngineConfig, tt: Arc<TranspositionTable>) -> Self {
        Self {
            name: format!("Minimax (depth {})", config.max_depth),
            evaluator: Evaluator::new(config.profile),
            config,
            tt,
            nodes: 0,
        }
    }

    /// Depth 3 within 5 seconds.
    pub fn quick() -> Self {
        Self::with_config(EngineConfig::quick()).named("Minimax (quick)")
    }

    /// Depth 5 within 10 seconds.
    pub fn strong() -> Self {
        Self::with_config(EngineConfig::strong()).named("Minimax (strong)")
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn table(&self) -> &Arc<TranspositionTable> {
        &self.tt
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let max_depth = limits.depth.min(self.config.max_depth).clamp(1, MAX_DEPTH);
        let clock = limits.start();

        let mut searcher = Searcher::new(&self.tt, self.evaluator, clock)
            .with_quiescence_checks(self.config.quiescence_checks);
        let result = searcher.iterate(pos, max_depth);

        self.nodes = result.nodes;
        result
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.nodes = 0;
    }
}
