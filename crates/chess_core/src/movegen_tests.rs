use super::*;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    let moves = legal_moves(&fen(KIWIPETE));
    assert_eq!(moves.len(), 48);
    // Both castles are available
    assert!(moves.contains(&Move::new(4, 6)));
    assert!(moves.contains(&Move::new(4, 2)));
}

#[test]
fn test_moves_from_square() {
    let pos = Position::startpos();
    let knight = legal_moves_from(&pos, 6); // g1
    let targets: Vec<u8> = knight.iter().map(|m| m.to).collect();
    assert_eq!(knight.len(), 2);
    assert!(targets.contains(&21) && targets.contains(&23));
    assert!(legal_moves_from(&pos, 28).is_empty()); // empty e4
}

#[test]
fn test_en_passant_generated_and_played() {
    // White pawn e5, black just played d7-d5
    let mut pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    let ep = Move::new(36, 43); // e5xd6
    assert!(legal_moves(&pos).contains(&ep));
    assert!(pos.is_capture(ep));
    pos.make_move(ep);
    assert_eq!(pos.piece_at(35), None, "captured pawn removed from d5");
    assert_eq!(pos.to_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
}

#[test]
fn test_promotion_choices() {
    let pos = fen("8/P6k/8/8/8/8/8/4K3 w - - 0 1");
    let promos: Vec<Move> = legal_moves_from(&pos, 48);
    assert_eq!(promos.len(), 4);
    assert_eq!(promos[0], Move::with_promo(48, 56, PieceKind::Queen));
    assert!(promos.iter().all(|m| m.promo.is_some()));
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight e2 pinned by the rook on e8
    let pos = fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(legal_moves_from(&pos, 12).is_empty());
}

#[test]
fn test_no_castling_through_check() {
    // Black rook on f8 covers f1
    let pos = fen("k4r2/8/8/8/8/8/8/4K2R w K - 0 1");
    assert!(!legal_moves(&pos).contains(&Move::new(4, 6)));
}

#[test]
fn test_make_unmake_round_trip() {
    // Every legal move, two plies deep, from a handful of reachable positions
    for start in [
        Position::startpos(),
        fen(KIWIPETE),
        fen("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1"),
        fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ] {
        let mut pos = start.clone();
        for mv in legal_moves(&start) {
            let before = pos.to_fen();
            let undo = pos.make_move(mv);
            for reply in legal_moves(&pos) {
                let mid = pos.to_fen();
                let u2 = pos.make_move(reply);
                pos.unmake_move(reply, u2);
                assert_eq!(pos.to_fen(), mid, "unmake of {reply} after {mv}");
            }
            pos.unmake_move(mv, undo);
            assert_eq!(pos.to_fen(), before, "unmake of {mv}");
            assert_eq!(pos, start);
        }
    }
}
