//! Move ordering: good captures first, then checks, then killers.

use std::cmp::Reverse;

use chess_core::{Move, PieceKind, Position};

use crate::eval::{piece_value, Score};

/// Number of depth slots in the killer table.
pub const KILLER_SLOTS: usize = 64;

/// Quiet moves that caused a beta cutoff, two per remaining depth, newest first.
#[derive(Debug, Clone)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; KILLER_SLOTS],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; KILLER_SLOTS],
        }
    }

    #[inline]
    fn slot(depth: u8) -> usize {
        (depth as usize).min(KILLER_SLOTS - 1)
    }

    pub fn record(&mut self, depth: u8, mv: Move) {
        let slot = &mut self.slots[Self::slot(depth)];
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn killers(&self, depth: u8) -> [Option<Move>; 2] {
        self.slots[Self::slot(depth)]
    }

    pub fn is_killer(&self, depth: u8, mv: Move) -> bool {
        self.killers(depth).contains(&Some(mv))
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; KILLER_SLOTS];
    }
}

/// Static exchange estimate of a capture.
///
/// The captured value, minus 70% of the capturer's value when the
/// destination is defended.
pub fn see(pos: &Position, mv: &Move) -> Score {
    let captured = if mv.is_en_passant() {
        piece_value(PieceKind::Pawn)
    } else {
        pos.piece_at(mv.to).map_or(0, |p| piece_value(p.kind))
    };
    let capturer = pos.piece_at(mv.from).map_or(0, |p| piece_value(p.kind));

    if pos.is_attacked(mv.to, !pos.side_to_move()) {
        captured - capturer * 7 / 10
    } else {
        captured
    }
}

/// Orders `moves` for the main search at `depth`.
///
/// Captures by descending SEE, then checking moves, then this depth's
/// killers, then everything else. Generator order is kept inside each group.
pub fn order_moves(moves: Vec<Move>, pos: &Position, depth: u8, killers: &KillerTable) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut checks = Vec::new();
    let mut killer_moves = Vec::new();
    let mut rest = Vec::with_capacity(moves.len());

    for mv in moves {
        if mv.is_capture() {
            captures.push((see(pos, &mv), mv));
        } else if mv.gives_check() {
            checks.push(mv);
        } else if killers.is_killer(depth, mv) {
            killer_moves.push(mv);
        } else {
            rest.push(mv);
        }
    }

    // sort_by_key is stable
    captures.sort_by_key(|&(score, _)| Reverse(score));

    let mut ordered = Vec::with_capacity(captures.len() + checks.len() + killer_moves.len() + rest.len());
    ordered.extend(captures.into_iter().map(|(_, mv)| mv));
    ordered.extend(checks);
    ordered.extend(killer_moves);
    ordered.extend(rest);
    ordered
}

/// Captures by descending SEE, for quiescence.
pub fn order_captures(captures: Vec<Move>, pos: &Position) -> Vec<Move> {
    let mut scored: Vec<(Score, Move)> = captures.into_iter().map(|mv| (see(pos, &mv), mv)).collect();
    scored.sort_by_key(|&(score, _)| Reverse(score));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

/// Moves `mv` to the front, keeping the relative order of the others.
pub fn move_to_front(moves: &mut [Move], mv: Move) {
    if let Some(idx) = moves.iter().position(|&m| m == mv) {
        moves[..=idx].rotate_right(1);
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
