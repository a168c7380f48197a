use super::*;

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_startpos_is_mobility_only() {
    // Material and castling cancel; White has 20 moves
    assert_eq!(evaluate(&Position::startpos()), 40);
}

#[test]
fn test_mobility_is_signed_by_side_to_move() {
    let pos = fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(evaluate(&pos), -40);
}

#[test]
fn test_mate_scores() {
    // White mated (fool's mate)
    let white_mated = fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(evaluate(&white_mated), -MATE_SCORE);
    let black_mated = fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert_eq!(evaluate(&black_mated), MATE_SCORE);
}

#[test]
fn test_stalemate_is_zero() {
    assert_eq!(evaluate(&fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1")), 0);
}

#[test]
fn test_center_bonus_and_material() {
    // Lone white knight on e4; kings have no value. Black to move: king on a8
    // has 3 moves (a7, b7, b8).
    let pos = fen("k7/8/8/8/4N3/8/8/7K b - - 0 1");
    assert_eq!(evaluate(&pos), 320 + 12 - 3 * 2);
}

#[test]
fn test_castling_rights_bonus() {
    let both = fen("r3k3/8/8/8/8/8/8/4K2R w Kq - 0 1");
    let white_only = fen("r3k3/8/8/8/8/8/8/4K2R w K - 0 1");
    assert_eq!(evaluate(&white_only) - evaluate(&both), 10);
}

#[test]
fn test_evaluate_is_deterministic() {
    let pos = fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
    let first = evaluate(&pos);
    for _ in 0..5 {
        assert_eq!(evaluate(&pos), first);
    }
}
