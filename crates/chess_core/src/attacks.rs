//! Attack detection on the mailbox board.
//!
//! Everything here answers one question: which pieces of a given color
//! attack a square? Move legality (king safety, castling through check) and
//! the coach's center-control count are both built on it. Squares occupied
//! by the attacker's own pieces still count as attacked, so the same query
//! doubles as "how many defenders does this square have".

use crate::{board::Position, types::*};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) fn knight_deltas() -> &'static [(i8, i8)] {
    &KNIGHT_DELTAS
}

pub(crate) fn king_deltas() -> &'static [(i8, i8)] {
    &KING_DELTAS
}

/// Squares of all `by` pieces attacking `target`, ordered pawns, knights,
/// king, then sliders.
pub fn attackers(pos: &Position, target: u8, by: Color) -> Vec<u8> {
    let mut out = Vec::new();
    collect_attackers(pos, target, by, &mut out, false);
    out
}

/// Number of `by` pieces attacking `target`.
pub fn attacker_count(pos: &Position, target: u8, by: Color) -> usize {
    attackers(pos, target, by).len()
}

/// True if any `by` piece attacks `target`. Stops at the first attacker.
pub fn is_square_attacked(pos: &Position, target: u8, by: Color) -> bool {
    let mut out = Vec::with_capacity(1);
    collect_attackers(pos, target, by, &mut out, true);
    !out.is_empty()
}

fn collect_attackers(pos: &Position, target: u8, by: Color, out: &mut Vec<u8>, first_only: bool) {
    let tf = file_of(target);
    let tr = rank_of(target);

    let found = |s: u8, out: &mut Vec<u8>| {
        out.push(s);
        first_only
    };

    // A white pawn attacks upward, so it sits one rank below the target.
    let pawn_dirs: [(i8, i8); 2] = match by {
        Color::White => [(-1, -1), (1, -1)],
        Color::Black => [(-1, 1), (1, 1)],
    };
    for (df, dr) in pawn_dirs {
        if let Some(s) = sq(tf + df, tr + dr)
            && pos.piece_at(s) == Some(Piece::new(by, PieceKind::Pawn))
            && found(s, out)
        {
            return;
        }
    }

    for (df, dr) in KNIGHT_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr)
            && pos.piece_at(s) == Some(Piece::new(by, PieceKind::Knight))
            && found(s, out)
        {
            return;
        }
    }

    for (df, dr) in KING_DELTAS {
        if let Some(s) = sq(tf + df, tr + dr)
            && pos.piece_at(s) == Some(Piece::new(by, PieceKind::King))
            && found(s, out)
        {
            return;
        }
    }

    let sliders = [
        (&DIAGONALS, PieceKind::Bishop),
        (&ORTHOGONALS, PieceKind::Rook),
    ];
    for (dirs, kind) in sliders {
        for (df, dr) in dirs.iter().copied() {
            let mut f = tf + df;
            let mut r = tr + dr;
            while let Some(s) = sq(f, r) {
                if let Some(pc) = pos.piece_at(s) {
                    if pc.color == by
                        && (pc.kind == kind || pc.kind == PieceKind::Queen)
                        && found(s, out)
                    {
                        return;
                    }
                    break;
                }
                f += df;
                r += dr;
            }
        }
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
