use chess_core::ChessError;
use classical_engine::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("bad start position: {0}")]
    Fen(#[source] ChessError),

    #[error(transparent)]
    Move(#[from] ChessError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode game record: {0}")]
    Json(#[from] serde_json::Error),
}
