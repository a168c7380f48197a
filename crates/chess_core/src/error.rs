//! Errors raised while reading positions and moves from text.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    #[error("move {0} is not legal in this position")]
    IllegalMove(String),

    #[error("invalid SAN token '{token}': {reason}")]
    InvalidSan { token: String, reason: String },
}

impl ChessError {
    pub(crate) fn fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.into(),
        }
    }
}
