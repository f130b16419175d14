use std::fmt;

pub use cozy_chess::{BitBoard, Color, File, Piece as PieceKind, Rank, Square};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

/// Descriptive tags attached to a legal move when it is generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveTags {
    pub capture: bool,
    pub check: bool,
    pub castle: bool,
    pub en_passant: bool,
}

/// A legal move produced by [`Position::legal_moves`](crate::Position::legal_moves).
///
/// `to` is the destination the player sees, so castling reports the king's
/// target square (`e1g1`). Equality and hashing use the coordinate encoding
/// only; tags never make two moves differ.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promo: Option<PieceKind>,
    pub tags: MoveTags,
    pub(crate) raw: cozy_chess::Move,
}

impl Move {
    pub(crate) fn new(raw: cozy_chess::Move, tags: MoveTags) -> Self {
        let to = if tags.castle {
            // cozy-chess encodes castling as king-takes-own-rook
            let file = if (raw.to.file() as u8) > (raw.from.file() as u8) {
                File::G
            } else {
                File::C
            };
            Square::new(file, raw.from.rank())
        } else {
            raw.to
        };
        Self {
            from: raw.from,
            to,
            promo: raw.promotion,
            tags,
            raw,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.tags.capture
    }

    #[inline]
    pub fn gives_check(&self) -> bool {
        self.tags.check
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.tags.castle
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.tags.en_passant
    }

    /// Neither a capture nor a promotion.
    #[inline]
    pub fn is_quiet(&self) -> bool {
        !self.tags.capture && self.promo.is_none()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Move {}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promo {
            write!(f, "{}", promo_char(kind))?;
        }
        Ok(())
    }
}

fn promo_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Queen => 'q',
        PieceKind::Rook => 'r',
        PieceKind::Bishop => 'b',
        PieceKind::Knight => 'n',
        PieceKind::Pawn => 'p',
        PieceKind::King => 'k',
    }
}

/// Result of the game as seen from a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    WhiteWins,
    BlackWins,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::WhiteWins => Some(Color::White),
            Outcome::BlackWins => Some(Color::Black),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// PGN-style result token.
    pub fn result_str(self) -> &'static str {
        match self {
            Outcome::WhiteWins => "1-0",
            Outcome::BlackWins => "0-1",
            Outcome::Draw => "1/2-1/2",
            Outcome::Ongoing => "*",
        }
    }
}

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::Checkmate => "checkmate",
            Termination::Stalemate => "stalemate",
            Termination::FiftyMoveRule => "fifty-move rule",
            Termination::ThreefoldRepetition => "threefold repetition",
            Termination::InsufficientMaterial => "insufficient material",
        };
        f.write_str(s)
    }
}
