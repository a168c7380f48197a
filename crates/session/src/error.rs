use std::{io, path::PathBuf};

use chess_core::ChessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("move {0} is not legal in the current position")]
    IllegalMove(String),

    #[error("the game is over; undo or start a new game")]
    NotRunning,

    #[error("computer move computed for generation {ticket}, session is at {current}")]
    StaleAiResult { ticket: u64, current: u64 },

    #[error("failed to write {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Chess(#[from] ChessError),
}
