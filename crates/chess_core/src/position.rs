//! The position oracle consumed by every engine.
//!
//! Rules (legality, move application, Zobrist keys) come from cozy-chess.
//! This wrapper adds what a game needs on top of a bare board: move tags,
//! the history required for threefold repetition, and outcome detection.

use cozy_chess::{Board, Piece as CozyPiece};

use crate::attacks;
use crate::error::ChessError;
use crate::types::*;

/// Snapshot of a game: board plus the fingerprints of earlier positions
/// reachable for repetition purposes.
///
/// The public API never mutates a position in place except through
/// [`Position::play`]; search code uses [`Position::apply`] to get successors.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    /// Fingerprints since the last irreversible move, oldest first. Excludes the current one.
    history: Vec<u64>,
}

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const DARK_SQUARES: BitBoard = BitBoard(0xAA55_AA55_AA55_AA55);

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self::from_board(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
        }
    }

    /// Parses a FEN string. The halfmove and fullmove fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let trimmed = fen.trim();
        let padded = match trimmed.split_whitespace().count() {
            4 => format!("{trimmed} 0 1"),
            5 => format!("{trimmed} 1"),
            _ => trimmed.to_string(),
        };
        let board = Board::from_fen(&padded, false).map_err(|err| ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{err:?}"),
        })?;
        Ok(Self::from_board(board))
    }

    pub fn to_fen(&self) -> String {
        format!("{}", self.board)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Zobrist key of the position. Only ever used as a cache key.
    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.board.hash()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        Some(Piece {
            color: self.board.color_on(sq)?,
            kind: self.board.piece_on(sq)?,
        })
    }

    #[inline]
    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    pub fn attackers(&self, sq: Square, by: Color) -> BitBoard {
        attacks::attackers(&self.board, sq, by)
    }

    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        attacks::is_attacked(&self.board, sq, by)
    }

    /// All legal moves with their tags, in generator order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            let piece = piece_moves.piece;
            for raw in piece_moves {
                moves.push(self.tag_move(piece, raw));
            }
            false
        });
        moves
    }

    /// Legal captures only, including en passant.
    pub fn captures(&self) -> Vec<Move> {
        let us = self.side_to_move();
        let enemies = self.board.colors(!us);
        let ep_target = self.en_passant_target();

        let mut moves = Vec::with_capacity(16);
        self.board.generate_moves(|mut piece_moves| {
            let piece = piece_moves.piece;
            let mut targets = enemies;
            if piece == CozyPiece::Pawn {
                if let Some(ep) = ep_target {
                    targets = targets | ep.bitboard();
                }
            }
            piece_moves.to = piece_moves.to & targets;
            for raw in piece_moves {
                moves.push(self.tag_move(piece, raw));
            }
            false
        });
        moves
    }

    pub fn legal_move_count(&self) -> usize {
        count_moves(&self.board)
    }

    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    /// Looks up a legal move by its coordinate encoding (`e2e4`, `e7e8q`, `e1g1`).
    pub fn find_move(&self, coords: &str) -> Option<Move> {
        let coords = coords.trim();
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.to_string().eq_ignore_ascii_case(coords))
    }

    /// Returns the successor position. Rejects moves that are not legal here.
    pub fn apply(&self, mv: Move) -> Result<Position, ChessError> {
        let mut next = self.clone();
        next.play(mv)?;
        Ok(next)
    }

    /// Plays `mv` in place. The position is unchanged on error.
    pub fn play(&mut self, mv: Move) -> Result<(), ChessError> {
        if !self.board.is_legal(mv.raw) {
            return Err(ChessError::IllegalMove {
                mv: mv.to_string(),
                fen: self.to_fen(),
            });
        }

        let previous = self.board.hash();
        self.board.play_unchecked(mv.raw);

        if self.board.halfmove_clock() == 0 {
            // Pawn moves and captures cannot be undone, so nothing earlier can repeat.
            self.history.clear();
        } else {
            self.history.push(previous);
        }
        Ok(())
    }

    pub fn outcome(&self) -> Outcome {
        match self.termination() {
            None => Outcome::Ongoing,
            Some(Termination::Checkmate) => match self.side_to_move() {
                Color::White => Outcome::BlackWins,
                Color::Black => Outcome::WhiteWins,
            },
            Some(_) => Outcome::Draw,
        }
    }

    /// Reason the game is over, or `None` while it is still going.
    pub fn termination(&self) -> Option<Termination> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Termination::Checkmate
            } else {
                Termination::Stalemate
            });
        }
        if self.is_fifty_move_draw() {
            return Some(Termination::FiftyMoveRule);
        }
        if self.is_threefold_repetition() {
            return Some(Termination::ThreefoldRepetition);
        }
        if self.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        None
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.board.halfmove_clock() >= 100
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let key = self.fingerprint();
        let earlier = self.history.iter().filter(|&&k| k == key).count();
        earlier >= 2
    }

    /// Bare kings, a single minor piece, or only bishops all on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.board;
        let heavy = b.pieces(CozyPiece::Pawn) | b.pieces(CozyPiece::Rook) | b.pieces(CozyPiece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let knights = b.pieces(CozyPiece::Knight);
        let bishops = b.pieces(CozyPiece::Bishop);
        if (knights | bishops).len() <= 1 {
            return true;
        }
        knights.is_empty() && ((bishops & DARK_SQUARES).is_empty() || (bishops & !DARK_SQUARES).is_empty())
    }

    fn en_passant_target(&self) -> Option<Square> {
        let file = self.board.en_passant()?;
        let rank = match self.side_to_move() {
            Color::White => Rank::Sixth,
            Color::Black => Rank::Third,
        };
        Some(Square::new(file, rank))
    }

    fn tag_move(&self, piece: PieceKind, raw: cozy_chess::Move) -> Move {
        let us = self.side_to_move();
        let castle = piece == CozyPiece::King && self.board.color_on(raw.to) == Some(us);
        let en_passant = piece == CozyPiece::Pawn
            && raw.from.file() != raw.to.file()
            && self.board.piece_on(raw.to).is_none();
        let capture = en_passant || self.board.color_on(raw.to) == Some(!us);

        let mut after = self.board.clone();
        after.play_unchecked(raw);
        let check = !after.checkers().is_empty();

        Move::new(
            raw,
            MoveTags {
                capture,
                check,
                castle,
                en_passant,
            },
        )
    }
}

/// Number of legal moves on a bare board.
pub fn count_moves(board: &Board) -> usize {
    let mut count = 0;
    board.generate_moves(|piece_moves| {
        count += piece_moves.into_iter().count();
        false
    });
    count
}

#[cfg(test)]
#[path = "position_tests.rs"]
mod position_tests;
