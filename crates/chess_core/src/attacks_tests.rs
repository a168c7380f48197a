use super::*;

#[test]
fn test_knight_attacks_square() {
    // Knight on g1 (6) attacks f3 (21) and h3 (23)
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K1N1 w - - 0 1").unwrap();
    assert_eq!(attackers(&pos, 21, Color::White), vec![6]);
    assert_eq!(attackers(&pos, 23, Color::White), vec![6]);
    assert!(!is_square_attacked(&pos, 22, Color::White));
}

#[test]
fn test_pawn_attacks_direction() {
    // White pawn on e4 attacks d5 and f5, not d3
    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
    assert!(is_square_attacked(&pos, 35, Color::White));
    assert!(is_square_attacked(&pos, 37, Color::White));
    assert!(!is_square_attacked(&pos, 19, Color::White));
}

#[test]
fn test_sliders_blocked() {
    // Rook a1, own pawn a2 blocks the file
    let pos = Position::from_fen("4k3/8/8/8/8/8/P7/R3K3 w - - 0 1").unwrap();
    assert!(is_square_attacked(&pos, 8, Color::White)); // a2 is defended by the rook
    assert!(!is_square_attacked(&pos, 16, Color::White)); // a3 is shadowed
}

#[test]
fn test_defenders_of_center_at_start() {
    let pos = Position::startpos();
    // Nothing reaches e4 in the initial position
    assert_eq!(attacker_count(&pos, 28, Color::White), 0);
    // e3 is covered by d2 and f2 pawns
    assert_eq!(attacker_count(&pos, 20, Color::White), 2);
}

#[test]
fn test_queen_counts_on_both_lines() {
    // Queen d1 sees d4 (file) and a4 (diagonal)
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
    assert_eq!(attackers(&pos, 27, Color::White), vec![3]);
    assert_eq!(attackers(&pos, 24, Color::White), vec![3]);
}
