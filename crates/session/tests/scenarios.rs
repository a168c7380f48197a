//! End-to-end games through the public session API.

use std::time::Instant;

use chess_core::{parse_movetext, parse_uci_move, read_pgn, Color, Position};
use chess_session::{GameSession, Outcome, SessionConfig};

fn play(session: &mut GameSession, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(session.position(), txt).unwrap();
        session.apply(mv).unwrap();
    }
}

#[test]
fn open_game_four_moves() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4", "e7e5", "g1f3", "b8c6"]);

    let moves: Vec<String> = s.history().moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(moves, ["e2e4", "e7e5", "g1f3", "b8c6"]);
    assert_eq!(s.side_to_move(), Color::White);
    assert!(!s.position().is_check());
    assert!(s.is_running());
    assert_eq!(s.outcome(), None);
}

#[test]
fn fools_mate_then_undo() {
    let mut s = GameSession::default();
    play(&mut s, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(s.position().is_checkmate());
    assert!(!s.is_running());
    assert_eq!(s.outcome(), Some(Outcome::Checkmate { winner: Color::Black }));
    assert_eq!(s.display().status, "checkmate");

    assert!(s.undo());
    assert!(s.is_running());
    assert!(!s.position().is_checkmate());
    assert_eq!(s.outcome(), None);
}

#[test]
fn clock_runs_out() {
    let config = SessionConfig {
        clock_secs: 1.0,
        ..SessionConfig::default()
    };
    let mut s = GameSession::new(config);
    assert_eq!(s.tick(1.5), Some(Color::White));
    assert_eq!(s.clock().remaining(Color::White), 0.0);
    assert_eq!(s.clock().remaining(Color::Black), 1.0);
    assert!(!s.is_running());
    assert_eq!(s.display().status, "white flag fell");
    // Clicks do nothing once the flag has fallen
    assert_eq!(s.click(12, Instant::now()), None);
}

#[test]
fn export_and_read_back() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4", "e7e5"]);
    let pgn = s.export_pgn().unwrap();
    assert!(pgn.contains("1. e4 e5"));

    let path = std::env::temp_dir().join(format!("chess_session_{}.pgn", std::process::id()));
    s.export_to_file(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let game = read_pgn(&written).unwrap();
    assert_eq!(game.moves, s.history().moves());
    assert_eq!(game.result, "*");

    let movetext = written.lines().last().unwrap();
    assert_eq!(
        parse_movetext(&Position::startpos(), movetext).unwrap(),
        s.history().moves()
    );
}

#[test]
fn export_goes_to_configured_path() {
    let path = std::env::temp_dir().join(format!("chess_session_default_{}.pgn", std::process::id()));
    let config = SessionConfig {
        export_path: path.clone(),
        ..SessionConfig::default()
    };
    let mut s = GameSession::new(config);
    play(&mut s, &["d2d4", "d7d5"]);
    s.export_default().unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(read_pgn(&written).unwrap().moves, s.history().moves());
}

#[test]
fn export_from_custom_start_carries_fen() {
    let fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1";
    let mut s = GameSession::from_position(
        SessionConfig::default(),
        Position::from_fen(fen).unwrap(),
    );
    play(&mut s, &["e2e4"]);
    let game = read_pgn(&s.export_pgn().unwrap()).unwrap();
    assert_eq!(game.header("FEN"), Some(fen));
    assert_eq!(game.moves, s.history().moves());
}

#[test]
fn new_game_resets_everything() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4", "e7e5"]);
    s.tick(30.0);
    s.new_game();
    assert!(s.history().is_empty());
    assert_eq!(s.position(), &Position::startpos());
    assert_eq!(s.clock().remaining(Color::White), 300.0);
    assert_eq!(s.display().last_move, None);
}

#[test]
fn display_serializes_to_json() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4"]);
    let json = serde_json::to_value(s.display()).unwrap();
    assert_eq!(json["active_side"], "Black");
    assert_eq!(json["last_move"], "e2e4");
    assert_eq!(json["white_clock"], "05:00");
    assert_eq!(json["ai_tier"], 2);
    let fraction = json["eval_fraction"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&fraction));
}
