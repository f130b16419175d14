//! Iterative-deepening negamax with alpha-beta pruning and quiescence.

use chess_core::{Move, Position, SearchResult, Termination, TimeControl};
use rand::seq::SliceRandom;
use tracing::{debug, info, trace};

use crate::eval::{Evaluator, Score, INFINITY, MATE, MATE_THRESHOLD};
use crate::ordering::{move_to_front, order_captures, order_moves, KillerTable};
use crate::tt::{Bound, TranspositionTable, TtEntry};

/// Score of a finished game for the side to move, `None` while it goes on.
///
/// Being mated at `ply` scores `-(MATE - ply)`, so quicker mates rank higher
/// for the winner.
pub fn terminal_score(pos: &Position, ply: u32) -> Option<Score> {
    match pos.termination()? {
        Termination::Checkmate => Some(-(MATE - ply as Score)),
        _ => Some(0),
    }
}

/// Mate scores are stored relative to the node, not the root.
fn score_to_tt(score: Score, ply: u32) -> Score {
    if score >= MATE_THRESHOLD {
        score + ply as Score
    } else if score <= -MATE_THRESHOLD {
        score - ply as Score
    } else {
        score
    }
}

fn score_from_tt(score: Score, ply: u32) -> Score {
    if score >= MATE_THRESHOLD {
        score - ply as Score
    } else if score <= -MATE_THRESHOLD {
        score + ply as Score
    } else {
        score
    }
}

/// State of one top-level search call.
///
/// Killers, node count and the clock belong to the call; the table is
/// borrowed from the engine and outlives it.
pub struct Searcher<'a> {
    tt: &'a TranspositionTable,
    evaluator: Evaluator,
    killers: KillerTable,
    clock: TimeControl,
    nodes: u64,
    aborted: bool,
    quiescence_checks: bool,
}

impl<'a> Searcher<'a> {
    pub fn new(tt: &'a TranspositionTable, evaluator: Evaluator, clock: TimeControl) -> Self {
        Self {
            tt,
            evaluator,
            killers: KillerTable::new(),
            clock,
            nodes: 0,
            aborted: false,
            quiescence_checks: false,
        }
    }

    /// Also search quiet checking moves at the first quiescence ply.
    pub fn with_quiescence_checks(mut self, enabled: bool) -> Self {
        self.quiescence_checks = enabled;
        self
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Whether the deadline cut the search short.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Runs depths `1..=max_depth` until the clock runs out.
    ///
    /// The answer is always the best move of the deepest completed
    /// iteration. If not even depth 1 completes, a random legal move is
    /// returned instead.
    pub fn iterate(&mut self, pos: &Position, max_depth: u8) -> SearchResult {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return SearchResult::no_move();
        }
        trace!(eval = %self.evaluator.breakdown(pos), "root evaluation");

        let mut best: Option<(Move, Score)> = None;
        let mut completed = 0;

        for depth in 1..=max_depth.max(1) {
            let Some((mv, score)) = self.search_depth(pos, depth, best.map(|(mv, _)| mv)) else {
                break;
            };
            best = Some((mv, score));
            completed = depth;
            debug!(
                depth,
                score,
                nodes = self.nodes,
                best = %mv,
                elapsed_ms = self.clock.elapsed().as_millis() as u64,
                "iteration complete"
            );
        }

        match best {
            Some((mv, score)) => SearchResult {
                best_move: Some(mv),
                score,
                depth: completed,
                nodes: self.nodes,
                stopped: self.aborted,
            },
            None => {
                let fallback = moves.choose(&mut rand::thread_rng()).copied();
                info!(
                    fen = %pos.to_fen(),
                    fallback = ?fallback.map(|mv| mv.to_string()),
                    "no iteration completed before the deadline, playing a random move"
                );
                SearchResult {
                    best_move: fallback,
                    score: 0,
                    depth: 0,
                    nodes: self.nodes,
                    stopped: true,
                }
            }
        }
    }

    /// One full-width iteration at the root.
    ///
    /// `first` is searched before everything else. Returns `None` if the
    /// deadline passed before every root move was searched.
    pub fn search_depth(&mut self, pos: &Position, depth: u8, first: Option<Move>) -> Option<(Move, Score)> {
        let mut moves = order_moves(pos.legal_moves(), pos, depth, &self.killers);
        if let Some(mv) = first {
            move_to_front(&mut moves, mv);
        }

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<(Move, Score)> = None;

        for mv in moves {
            if self.clock.check_time() {
                self.aborted = true;
                return None;
            }
            let Ok(next) = pos.apply(mv) else {
                continue;
            };
            self.nodes += 1;

            let score = -self.negamax(&next, depth - 1, 1, -beta, -alpha);
            if self.aborted {
                return None;
            }

            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        let (mv, score) = best?;
        self.tt.store(
            pos.fingerprint(),
            TtEntry {
                depth,
                score: score_to_tt(score, 0),
                bound: Bound::Exact,
                best_move: Some(mv),
            },
        );
        Some((mv, score))
    }

    /// Negamax with alpha-beta pruning. Scores are for the side to move.
    ///
    /// Returns 0 and sets the abort flag once the deadline passes; callers
    /// must check [`Searcher::aborted`] before trusting the score.
    pub fn negamax(&mut self, pos: &Position, depth: u8, ply: u32, mut alpha: Score, mut beta: Score) -> Score {
        if self.clock.check_time() {
            self.aborted = true;
            return 0;
        }
        if let Some(score) = terminal_score(pos, ply) {
            return score;
        }
        if depth == 0 {
            return self.quiesce(pos, ply, alpha, beta);
        }

        let key = pos.fingerprint();
        if let Some(entry) = self.tt.probe(key) {
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::LowerBound => alpha = alpha.max(score),
                    Bound::UpperBound => beta = beta.min(score),
                }
                if alpha >= beta {
                    return score;
                }
            }
        }
        let window_alpha = alpha;

        let moves = order_moves(pos.legal_moves(), pos, depth, &self.killers);
        let mut best = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            let Ok(next) = pos.apply(mv) else {
                continue;
            };
            self.nodes += 1;

            let score = -self.negamax(&next, depth - 1, ply + 1, -beta, -alpha);
            if self.aborted {
                return 0;
            }

            if score > best {
                best = score;
                best_move = Some(mv);
            }
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                if mv.is_quiet() {
                    self.killers.record(depth, mv);
                }
                break;
            }
        }

        let bound = if best <= window_alpha {
            Bound::UpperBound
        } else if best >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };
        self.tt.store(
            key,
            TtEntry {
                depth,
                score: score_to_tt(best, ply),
                bound,
                best_move,
            },
        );
        best
    }

    /// Captures-only search from a depth-0 node (fail-hard).
    ///
    /// Returns `alpha` once the deadline passes.
    pub fn quiesce(&mut self, pos: &Position, ply: u32, alpha: Score, beta: Score) -> Score {
        self.quiesce_at(pos, ply, alpha, beta, true)
    }

    fn quiesce_at(&mut self, pos: &Position, ply: u32, mut alpha: Score, beta: Score, first: bool) -> Score {
        if self.clock.check_time() {
            self.aborted = true;
            return alpha;
        }
        if let Some(score) = terminal_score(pos, ply) {
            return score;
        }

        let stand_pat = self.evaluator.evaluate(pos);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = order_captures(pos.captures(), pos);
        if first && self.quiescence_checks && !pos.in_check() {
            moves.extend(
                pos.legal_moves()
                    .into_iter()
                    .filter(|mv| mv.gives_check() && !mv.is_capture()),
            );
        }

        for mv in moves {
            let Ok(next) = pos.apply(mv) else {
                continue;
            };
            self.nodes += 1;

            let score = -self.quiesce_at(&next, ply + 1, -beta, -alpha, false);
            if self.aborted {
                return alpha;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
