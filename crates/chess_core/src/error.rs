use thiserror::Error;

/// Errors surfaced by the position oracle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },
}
