//! The client against the real server binary of this crate.

use std::time::Duration;

use chess_core::{legal_moves, Position};
use uci_engine::{ExternalEngine, ExternalEngineError};

fn own_binary() -> ExternalEngine {
    ExternalEngine::new(env!("CARGO_BIN_EXE_uci_engine"))
        .with_movetime(Duration::from_millis(100))
        .with_reply_timeout(Duration::from_secs(10))
}

#[test]
fn test_client_gets_legal_move_from_server() {
    let pos = Position::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3")
        .unwrap();
    let mv = own_binary().best_move(&pos).unwrap();
    assert!(legal_moves(&pos).contains(&mv));
}

#[test]
fn test_client_reports_no_move_in_mate() {
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(matches!(own_binary().best_move(&pos), Err(ExternalEngineError::NoMove)));
}

#[test]
fn test_missing_executable_is_spawn_error() {
    let engine = ExternalEngine::new("/nonexistent/engine-binary");
    let err = engine.best_move(&Position::startpos()).unwrap_err();
    assert!(matches!(err, ExternalEngineError::Spawn { .. }));
}

#[cfg(unix)]
#[test]
fn test_silent_engine_times_out() {
    // `cat` echoes our commands back but never says bestmove
    let engine = ExternalEngine::new("cat").with_reply_timeout(Duration::from_millis(200));
    let err = engine.best_move(&Position::startpos()).unwrap_err();
    assert!(matches!(err, ExternalEngineError::Timeout(_)));
}
