use super::*;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_startpos_is_balanced() {
    let pos = Position::startpos();
    assert_eq!(center_control(&pos), 0);
    assert_eq!(advise(&pos), vec![Tip::KeepTempo]);
}

#[test]
fn test_center_differential_uses_side_to_move() {
    // After 1. e4 the pawn hits d5; Black has nothing on the center yet
    let pos = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    assert!(center_control(&pos) < 0);
    assert_eq!(advise(&pos)[0], Tip::ContestCenter);

    let white_view = fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(center_control(&white_view), -center_control(&pos));
    assert_eq!(advise(&white_view)[0], Tip::CenterHeld);
}

#[test]
fn test_check_and_endgame_tips() {
    // Black king in check from the rook, few pieces, few moves
    let pos = fen("4k3/8/8/8/8/8/8/K3R3 b - - 0 1");
    let tips = advise(&pos);
    assert!(tips.contains(&Tip::DefendCheck));
    assert!(tips.contains(&Tip::IncreaseActivity));
    assert_eq!(tips.last(), Some(&Tip::Endgame));
    assert!(!tips.contains(&Tip::KeepTempo));
}

#[test]
fn test_bare_kings() {
    // Low activity suppresses the acknowledgement
    let pos = fen("k7/8/8/8/8/8/8/7K w - - 0 1");
    assert_eq!(advise(&pos), vec![Tip::IncreaseActivity, Tip::Endgame]);
}

#[test]
fn test_text_joins_tips() {
    assert_eq!(
        coach_text(&[Tip::KeepTempo, Tip::Endgame]),
        "Good plan, keep tempo. Endgame: activate king, create passed pawn."
    );
    assert_eq!(coach_text(&[]), "");
}
