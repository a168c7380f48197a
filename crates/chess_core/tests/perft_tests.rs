//! Node counts for well-known positions. Deeper counts run only with
//! `FULL_PERFT=1`, split across root moves with rayon.

use rayon::prelude::*;

use chess_core::{Position, legal_moves, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";

const CASES: &[(&str, &str, &[u64])] = &[
    (
        "startpos",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8_902, 197_281],
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        &[48, 2_039, 97_862],
    ),
    (
        "position 3",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        &[14, 191, 2_812, 43_238],
    ),
    (
        "position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        &[6, 264, 9_467],
    ),
];

fn divided_perft(pos: &Position, depth: u8) -> u64 {
    legal_moves(pos)
        .par_iter()
        .map(|&mv| {
            let mut child = pos.clone();
            child.make_move(mv);
            perft(&mut child, depth - 1)
        })
        .sum()
}

#[test]
fn test_perft_shallow() {
    for (name, fen, counts) in CASES {
        let mut pos = Position::from_fen(fen).unwrap();
        for (i, &expected) in counts.iter().enumerate().take(2) {
            let depth = i as u8 + 1;
            assert_eq!(perft(&mut pos, depth), expected, "{name} depth {depth}");
        }
    }
}

#[test]
fn test_perft_full() {
    if std::env::var(FULL_PERFT_ENV).is_err() {
        return;
    }
    for (name, fen, counts) in CASES {
        let pos = Position::from_fen(fen).unwrap();
        for (i, &expected) in counts.iter().enumerate().skip(2) {
            let depth = i as u8 + 1;
            assert_eq!(divided_perft(&pos, depth), expected, "{name} depth {depth}");
        }
    }
}
