use std::{io, path::PathBuf, time::Duration};

use chess_core::ChessError;
use thiserror::Error;

/// Failures talking to an external UCI engine process. All of them are
/// recoverable: the caller falls back to an internal tier.
#[derive(Debug, Error)]
pub enum ExternalEngineError {
    #[error("failed to start engine {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("engine pipe error: {0}")]
    Io(#[from] io::Error),

    #[error("engine gave no bestmove within {0:?}")]
    Timeout(Duration),

    #[error("engine exited before answering")]
    NoReply,

    #[error("engine reports no legal move")]
    NoMove,

    #[error("engine replied '{reply}': {source}")]
    BadReply {
        reply: String,
        #[source]
        source: ChessError,
    },
}
