use std::time::Duration;

use super::*;
use chess_core::parse_uci_move;

fn play(session: &mut GameSession, moves: &[&str]) {
    for txt in moves {
        let mv = parse_uci_move(session.position(), txt).unwrap();
        session.apply(mv).unwrap();
    }
}

fn vs_black_computer(tier: uci_engine::Tier) -> GameSession {
    let mut config = SessionConfig::default();
    config.ai.black = true;
    config.ai.tier = tier;
    GameSession::new(config)
}

#[test]
fn test_clicks_play_a_move() {
    let mut s = GameSession::default();
    let now = Instant::now();
    assert_eq!(s.click(12, now), None);
    assert!(matches!(s.selection(), Selection::Selected { origin: 12, .. }));
    assert_eq!(s.click(28, now), Some(Move::new(12, 28)));
    assert_eq!(s.selection(), &Selection::Idle);
    assert_eq!(s.side_to_move(), Color::Black);
    assert_eq!(s.display().last_move.as_deref(), Some("e2e4"));
}

#[test]
fn test_destinations_never_stale() {
    let mut s = GameSession::default();
    let now = Instant::now();
    s.click(12, now);
    // A move arriving by another route clears the selection
    play(&mut s, &["d2d4"]);
    assert_eq!(s.selection(), &Selection::Idle);
}

#[test]
fn test_illegal_apply_changes_nothing() {
    let mut s = GameSession::default();
    let before = s.position().clone();
    let generation = s.generation();
    let err = s.apply(Move::new(12, 36)).unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove(_)));
    assert_eq!(s.position(), &before);
    assert!(s.history().is_empty());
    assert_eq!(s.generation(), generation);
}

#[test]
fn test_promotion_choice_and_timeout() {
    let pos = Position::from_fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let now = Instant::now();

    let mut chosen = GameSession::from_position(SessionConfig::default(), pos.clone());
    chosen.click(48, now);
    assert_eq!(chosen.click(56, now), None);
    assert!(chosen.display().awaiting_promotion);
    // Board clicks are ignored while waiting
    assert_eq!(chosen.click(4, now), None);
    assert_eq!(
        chosen.choose_promotion(PieceKind::Knight),
        Some(Move::with_promo(48, 56, PieceKind::Knight))
    );

    let mut timed_out = GameSession::from_position(SessionConfig::default(), pos);
    timed_out.click(48, now);
    timed_out.click(56, now);
    assert_eq!(timed_out.poll(now + Duration::from_secs(3)), None);
    assert_eq!(
        timed_out.poll(now + Duration::from_secs(7)),
        Some(Move::with_promo(48, 56, PieceKind::Queen))
    );
    assert_eq!(timed_out.selection(), &Selection::Idle);
}

#[test]
fn test_cancel_returns_to_idle() {
    let mut s = GameSession::default();
    s.click(6, Instant::now());
    s.cancel();
    assert_eq!(s.selection(), &Selection::Idle);
}

#[test]
fn test_clicks_ignored_on_computer_turn() {
    let mut s = vs_black_computer(uci_engine::Tier::Greedy);
    play(&mut s, &["e2e4"]);
    assert_eq!(s.click(52, Instant::now()), None);
    assert_eq!(s.selection(), &Selection::Idle);
}

const KNIGHT_SHUFFLE: [&str; 4] = ["g1f3", "g8f6", "f3g1", "f6g8"];

#[test]
fn test_threefold_repetition_is_only_claimable() {
    let mut s = GameSession::default();
    play(&mut s, &KNIGHT_SHUFFLE);
    assert_eq!(s.claimable_draw(), None);
    play(&mut s, &KNIGHT_SHUFFLE);
    assert!(s.is_running());
    assert_eq!(s.claimable_draw(), Some(DrawReason::ThreefoldRepetition));

    assert_eq!(s.claim_draw(), Some(DrawReason::ThreefoldRepetition));
    assert_eq!(s.outcome(), Some(Outcome::Draw(DrawReason::ThreefoldRepetition)));
    assert_eq!(s.status(), "draw");
    assert_eq!(s.result_token(), "1/2-1/2");
}

#[test]
fn test_fivefold_repetition_ends_game() {
    let mut s = GameSession::default();
    for _ in 0..3 {
        play(&mut s, &KNIGHT_SHUFFLE);
    }
    play(&mut s, &KNIGHT_SHUFFLE[..3]);
    assert!(s.is_running());
    play(&mut s, &KNIGHT_SHUFFLE[3..]);
    assert!(!s.is_running());
    assert_eq!(s.outcome(), Some(Outcome::Draw(DrawReason::FivefoldRepetition)));
    assert_eq!(s.history().len(), 16);
}

#[test]
fn test_fifty_move_rule_is_only_claimable() {
    let start = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
    let mut s = GameSession::from_position(SessionConfig::default(), start);
    assert_eq!(s.claimable_draw(), None);
    play(&mut s, &["a1a2"]);
    assert!(s.is_running());
    assert_eq!(s.outcome(), None);
    assert_eq!(s.claimable_draw(), Some(DrawReason::FiftyMoves));
}

#[test]
fn test_seventy_five_move_rule_ends_game() {
    let start = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 149 80").unwrap();
    let mut s = GameSession::from_position(SessionConfig::default(), start);
    assert!(s.is_running());
    play(&mut s, &["a1a2"]);
    assert!(!s.is_running());
    assert_eq!(s.outcome(), Some(Outcome::Draw(DrawReason::SeventyFiveMoves)));
    assert_eq!(s.claim_draw(), None);
}

#[test]
fn test_apply_after_game_over_is_rejected() {
    let mut s = GameSession::default();
    play(&mut s, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(matches!(
        s.apply(Move::new(12, 28)),
        Err(SessionError::NotRunning)
    ));
    assert_eq!(s.selection(), &Selection::GameOver);
    s.cancel();
    assert_eq!(s.selection(), &Selection::GameOver);
}

#[test]
fn test_undo_on_empty_history() {
    let mut s = GameSession::default();
    assert!(!s.undo());
    assert_eq!(s.generation(), 0);
}

#[test]
fn test_undo_twice_restores_start() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4", "c7c5"]);
    assert!(s.undo());
    assert!(s.undo());
    assert_eq!(s.position(), &Position::startpos());
    assert_eq!(s.last_move(), None);
}

#[test]
fn test_history_replays_to_current_position() {
    let mut s = GameSession::default();
    play(&mut s, &["e2e4", "d7d5", "e4d5", "g8f6", "f1b5", "c7c6", "d5c6"]);
    s.undo();
    assert_eq!(&s.history().replay(s.initial_position()), s.position());
}

#[test]
fn test_reset_clocks_resumes_after_flag() {
    let mut config = SessionConfig::default();
    config.clock_secs = 5.0;
    let mut s = GameSession::new(config);
    assert_eq!(s.tick(6.0), Some(Color::White));
    assert_eq!(s.status(), "white flag fell");
    assert_eq!(s.result_token(), "0-1");
    assert_eq!(s.tick(1.0), None, "stopped clocks stay put");

    s.reset_clocks();
    assert!(s.is_running());
    assert_eq!(s.clock().remaining(Color::White), 5.0);
}

#[test]
fn test_adjust_clocks() {
    let mut s = GameSession::default();
    s.adjust_clocks(1);
    assert_eq!(s.display().white_clock, "06:00");
    s.adjust_clocks(-10);
    assert_eq!(s.display().black_clock, "01:00");
}

#[test]
fn test_coach_toggle() {
    let mut s = GameSession::default();
    assert_eq!(s.display().coach_text, "Good plan, keep tempo.");
    assert!(!s.toggle_coach());
    assert_eq!(s.display().coach_text, "");
}

#[test]
fn test_ai_toggles_and_tier_cycle() {
    let mut s = GameSession::default();
    assert_eq!(s.cycle_tier(), uci_engine::Tier::Minimax);
    assert_eq!(s.cycle_tier(), uci_engine::Tier::Heuristic);
    assert!(s.toggle_ai(Color::White));
    let d = s.display();
    assert!(d.ai_white && !d.ai_black);
    assert_eq!(d.ai_tier, 1);
    assert!(s.request_ai().is_some());
}

#[test]
fn test_computer_replies() {
    for tier in [
        uci_engine::Tier::Heuristic,
        uci_engine::Tier::Greedy,
        uci_engine::Tier::Minimax,
    ] {
        let mut s = vs_black_computer(tier);
        let mut ai = AiCoordinator::with_seed(42);
        assert_eq!(s.play_ai_turn(&mut ai).unwrap(), None, "White is human");
        play(&mut s, &["e2e4"]);
        let reply = s.play_ai_turn(&mut ai).unwrap().expect("black answers");
        assert_eq!(s.last_move(), Some(reply));
        assert_eq!(s.side_to_move(), Color::White);
    }
}

#[test]
fn test_stale_ticket_is_discarded() {
    let mut s = vs_black_computer(uci_engine::Tier::Greedy);
    play(&mut s, &["e2e4"]);
    let req = s.request_ai().unwrap();
    let mv = AiCoordinator::with_seed(1).choose(&req).unwrap();

    // The game is reset while the computer was thinking
    s.new_game();
    play(&mut s, &["e2e4"]);
    let err = s.apply_ai_move(req.ticket, mv).unwrap_err();
    assert!(matches!(err, SessionError::StaleAiResult { .. }));
    assert_eq!(s.history().len(), 1);

    // A fresh ticket for the same position is accepted
    let fresh = s.request_ai().unwrap();
    s.apply_ai_move(fresh.ticket, mv).unwrap();
    assert_eq!(s.history().len(), 2);
}

#[test]
fn test_no_request_when_game_over() {
    let mut s = vs_black_computer(uci_engine::Tier::Greedy);
    s.tick(1_000.0);
    assert!(s.request_ai().is_none());
}

#[test]
fn test_pgn_names_players_and_result() {
    let mut s = vs_black_computer(uci_engine::Tier::Minimax);
    play(&mut s, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    let pgn = s.export_pgn().unwrap();
    assert!(pgn.contains("[White \"Human\"]"));
    assert!(pgn.contains("[Black \"Computer (tier 3)\"]"));
    assert!(pgn.contains("[Result \"0-1\"]"));
    assert!(pgn.contains("1. f3 e5 2. g4 Qh4# 0-1"));
}

#[test]
fn test_export_to_unwritable_path() {
    let s = GameSession::default();
    let err = s
        .export_to_file(Path::new("/nonexistent/dir/game.pgn"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Export { .. }));
}
