//! Composite static evaluation.
//!
//! Every term is computed from White's point of view and the weighted sum is
//! negated when Black is to move, so [`Evaluator::evaluate`] always answers
//! "how good is this for the side to move".

use std::fmt;
use std::str::FromStr;

use chess_core::attacks::{attacked_squares, attackers};
use chess_core::{count_moves, BitBoard, Color, PieceKind, Position};
use cozy_chess::{get_king_moves, Board};
use serde::{Deserialize, Serialize};

/// Centipawn score.
pub type Score = i32;

/// Terminal sentinel; no material count comes close.
pub const MATE: Score = 1_000_000;
/// Wider than any score the search can produce.
pub const INFINITY: Score = MATE + 1;
/// Scores beyond this magnitude are mate scores.
pub const MATE_THRESHOLD: Score = MATE - 1_000;

const CENTER: BitBoard = BitBoard(0x0000_0018_1800_0000);
const EXTENDED_CENTER: BitBoard = BitBoard(0x0000_3C24_243C_0000);
/// c3 through f6.
const ACTIVITY_ZONE: BitBoard = BitBoard(0x0000_3C3C_3C3C_0000);
const WHITE_HALF: BitBoard = BitBoard(0x0000_0000_FFFF_FFFF);

pub fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 325,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

/// Named weightings of the evaluation terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalProfile {
    #[default]
    Balanced,
    /// Material only.
    Material,
    /// Threats and center control count double.
    Aggressive,
}

impl EvalProfile {
    pub const ALL: [EvalProfile; 3] = [
        EvalProfile::Balanced,
        EvalProfile::Material,
        EvalProfile::Aggressive,
    ];

    pub fn weights(self) -> EvalWeights {
        match self {
            EvalProfile::Balanced => EvalWeights::UNIFORM,
            EvalProfile::Material => EvalWeights {
                material: 1,
                ..EvalWeights::NONE
            },
            EvalProfile::Aggressive => EvalWeights {
                threats: 2,
                center: 2,
                ..EvalWeights::UNIFORM
            },
        }
    }
}

impl fmt::Display for EvalProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EvalProfile::Balanced => "balanced",
            EvalProfile::Material => "material",
            EvalProfile::Aggressive => "aggressive",
        })
    }
}

impl FromStr for EvalProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EvalProfile::ALL
            .into_iter()
            .find(|profile| profile.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown evaluation profile '{s}' (expected balanced, material or aggressive)"))
    }
}

/// Multiplier applied to each term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalWeights {
    pub material: Score,
    pub threats: Score,
    pub mobility: Score,
    pub pawn_structure: Score,
    pub king_safety: Score,
    pub center: Score,
    pub activity: Score,
}

impl EvalWeights {
    pub const UNIFORM: EvalWeights = EvalWeights {
        material: 1,
        threats: 1,
        mobility: 1,
        pawn_structure: 1,
        king_safety: 1,
        center: 1,
        activity: 1,
    };

    pub const NONE: EvalWeights = EvalWeights {
        material: 0,
        threats: 0,
        mobility: 0,
        pawn_structure: 0,
        king_safety: 0,
        center: 0,
        activity: 0,
    };
}

/// Unweighted terms, all from White's point of view, plus the weighted total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub material: Score,
    pub threats: Score,
    pub mobility: Score,
    pub pawn_structure: Score,
    pub king_safety: Score,
    pub center: Score,
    pub activity: Score,
    pub total: Score,
}

impl EvalBreakdown {
    pub fn weighted(&self, w: &EvalWeights) -> Score {
        self.material * w.material
            + self.threats * w.threats
            + self.mobility * w.mobility
            + self.pawn_structure * w.pawn_structure
            + self.king_safety * w.king_safety
            + self.center * w.center
            + self.activity * w.activity
    }
}

impl fmt::Display for EvalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {} (material {}, threats {}, mobility {}, pawns {}, king {}, center {}, activity {})",
            self.total,
            self.material,
            self.threats,
            self.mobility,
            self.pawn_structure,
            self.king_safety,
            self.center,
            self.activity
        )
    }
}

/// Pure position evaluator. Cheap to copy; one lives in every search.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    profile: EvalProfile,
    weights: EvalWeights,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalProfile::default())
    }
}

impl Evaluator {
    pub fn new(profile: EvalProfile) -> Self {
        Self {
            profile,
            weights: profile.weights(),
        }
    }

    pub fn profile(&self) -> EvalProfile {
        self.profile
    }

    /// Score for the side to move.
    ///
    /// Finished games return `+MATE` when White has won and `-MATE` when Black
    /// has won regardless of who is to move, and 0 for draws.
    pub fn evaluate(&self, pos: &Position) -> Score {
        let outcome = pos.outcome();
        if outcome.is_terminal() {
            return match outcome.winner() {
                Some(Color::White) => MATE,
                Some(Color::Black) => -MATE,
                None => 0,
            };
        }
        let total = self.terms(pos).total;
        match pos.side_to_move() {
            Color::White => total,
            Color::Black => -total,
        }
    }

    /// Every term for an unfinished position, from White's point of view.
    /// Terms the profile ignores read 0.
    pub fn breakdown(&self, pos: &Position) -> EvalBreakdown {
        self.terms(pos)
    }

    fn terms(&self, pos: &Position) -> EvalBreakdown {
        let board = pos.board();
        let w = &self.weights;

        let mut terms = EvalBreakdown {
            material: weighted_term(w.material, || material(board)),
            threats: weighted_term(w.threats, || threats(board)),
            mobility: weighted_term(w.mobility, || mobility(board)),
            pawn_structure: weighted_term(w.pawn_structure, || {
                pawn_penalty(board, Color::Black) - pawn_penalty(board, Color::White)
            }),
            king_safety: weighted_term(w.king_safety, || {
                king_shelter(board, Color::White) - king_shelter(board, Color::Black)
            }),
            center: weighted_term(w.center, || center_control(board)),
            activity: weighted_term(w.activity, || {
                activity(board, Color::White) - activity(board, Color::Black)
            }),
            total: 0,
        };
        terms.total = terms.weighted(w);
        terms
    }
}

/// Terms with zero weight are never computed.
fn weighted_term(weight: Score, term: impl FnOnce() -> Score) -> Score {
    if weight == 0 {
        0
    } else {
        term()
    }
}

fn material(board: &Board) -> Score {
    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let white = board.colored_pieces(Color::White, kind).len() as Score;
            let black = board.colored_pieces(Color::Black, kind).len() as Score;
            piece_value(kind) * (white - black)
        })
        .sum()
}

/// Hanging pieces and available captures for the side to move.
fn threats(board: &Board) -> Score {
    let us = board.side_to_move();
    let them = !us;
    let mut score = 0;

    for sq in board.colors(us) & !board.pieces(PieceKind::King) {
        let Some(kind) = board.piece_on(sq) else {
            continue;
        };
        if attackers(board, sq, them).is_empty() {
            continue;
        }
        let mut penalty = piece_value(kind) / 10;
        if attackers(board, sq, us).is_empty() {
            penalty *= 3;
        }
        if kind != PieceKind::Pawn {
            penalty += 15;
        }
        score -= penalty;
    }

    let enemies = board.colors(them);
    board.generate_moves(|moves| {
        let capturer = piece_value(moves.piece);
        for to in moves.to & enemies {
            let Some(kind) = board.piece_on(to) else {
                continue;
            };
            let captured = piece_value(kind);
            let mut gain = captured / 20;
            if attackers(board, to, them).is_empty() {
                gain *= 2;
            }
            if captured > capturer {
                gain = gain * 3 / 2;
            }
            score += gain;
        }
        false
    });

    match us {
        Color::White => score,
        Color::Black => -score,
    }
}

/// Own move count minus the opponent's reply count.
fn mobility(board: &Board) -> Score {
    let own = count_moves(board) as Score;
    let opponent = match board.null_move() {
        Some(passed) => count_moves(&passed) as Score,
        None => {
            // In check: pass the turn by playing the first legal move instead
            let mut first = None;
            board.generate_moves(|moves| {
                first = moves.into_iter().next();
                first.is_some()
            });
            match first {
                Some(mv) => {
                    let mut after = board.clone();
                    after.play_unchecked(mv);
                    count_moves(&after) as Score
                }
                None => 0,
            }
        }
    };

    let diff = own - opponent;
    match board.side_to_move() {
        Color::White => diff,
        Color::Black => -diff,
    }
}

/// Doubled and isolated pawns of `color`, as a positive penalty.
fn pawn_penalty(board: &Board, color: Color) -> Score {
    let mut per_file: [Score; 8] = [0; 8];
    for sq in board.colored_pieces(color, PieceKind::Pawn) {
        per_file[sq.file() as usize] += 1;
    }

    let mut penalty = 0;
    for (file, &count) in per_file.iter().enumerate() {
        if count == 0 {
            continue;
        }
        penalty += 9 * (count - 1);
        let left = file > 0 && per_file[file - 1] > 0;
        let right = file < 7 && per_file[file + 1] > 0;
        if !left && !right {
            penalty += 15 * count;
        }
    }
    penalty
}

fn king_shelter(board: &Board, color: Color) -> Score {
    let ring = get_king_moves(board.king(color));
    let friends = (ring & board.colors(color)).len() as Score;
    let enemies = (ring & board.colors(!color)).len() as Score;
    10 * friends - 15 * enemies
}

fn center_control(board: &Board) -> Score {
    let white = attacked_squares(board, Color::White);
    let black = attacked_squares(board, Color::Black);

    [(CENTER, 4), (EXTENDED_CENTER, 2)]
        .into_iter()
        .map(|(squares, weight)| {
            weight
                * (controlled(board, squares, Color::White, white)
                    - controlled(board, squares, Color::Black, black))
        })
        .sum()
}

/// Squares of `squares` that `color` occupies, or attacks while not occupying.
fn controlled(board: &Board, squares: BitBoard, color: Color, attacked: BitBoard) -> Score {
    let own = board.colors(color) & squares;
    let contested = squares & !board.colors(color) & attacked;
    (own | contested).len() as Score
}

fn activity(board: &Board, color: Color) -> Score {
    let pieces = board.colors(color) & !board.pieces(PieceKind::King);
    let enemy_half = match color {
        Color::White => !WHITE_HALF,
        Color::Black => WHITE_HALF,
    };
    let active = (pieces & enemy_half).len() + (pieces & ACTIVITY_ZONE).len();
    2 * active as Score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
