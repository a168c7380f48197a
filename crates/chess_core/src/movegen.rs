use crate::{
    attacks::{king_deltas, knight_deltas, DIAGONALS, ORTHOGONALS},
    board::Position,
    types::*,
};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Legal moves whose origin is `from`, in generation order.
pub fn legal_moves_from(pos: &Position, from: u8) -> Vec<Move> {
    let mut moves = legal_moves(pos);
    moves.retain(|mv| mv.from == from);
    moves
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    // Filter illegal moves in-place by playing them on the mutable position.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for sq in 0..64u8 {
        let pc = match pos.piece_at(sq) {
            Some(p) => p,
            None => continue,
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, sq, pc.color, out),
            PieceKind::Knight => gen_steps(pos, sq, pc.color, out, knight_deltas()),
            PieceKind::Bishop => gen_slider(pos, sq, pc.color, out, &DIAGONALS),
            PieceKind::Rook => gen_slider(pos, sq, pc.color, out, &ORTHOGONALS),
            PieceKind::Queen => {
                gen_slider(pos, sq, pc.color, out, &DIAGONALS);
                gen_slider(pos, sq, pc.color, out, &ORTHOGONALS);
            }
            PieceKind::King => {
                gen_steps(pos, sq, pc.color, out, king_deltas());
                gen_castle(pos, sq, pc.color, out);
            }
        }
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);

    let dir: i8 = match c {
        Color::White => 1,
        Color::Black => -1,
    };
    let start_rank: i8 = match c {
        Color::White => 1,
        Color::Black => 6,
    };
    let promo_rank: i8 = match c {
        Color::White => 7,
        Color::Black => 0,
    };

    // forward 1
    if let Some(to) = sq(f, r + dir) {
        if pos.piece_at(to).is_none() {
            if rank_of(to) == promo_rank {
                push_promotions(from, to, out);
            } else {
                out.push(Move::new(from, to));
            }

            // forward 2 from start
            if r == start_rank {
                if let Some(to2) = sq(f, r + 2 * dir) {
                    if pos.piece_at(to2).is_none() {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    // captures + en-passant
    for df in [-1, 1] {
        if let Some(to) = sq(f + df, r + dir) {
            if let Some(tpc) = pos.piece_at(to) {
                if tpc.color != c {
                    if rank_of(to) == promo_rank {
                        push_promotions(from, to, out);
                    } else {
                        out.push(Move::new(from, to));
                    }
                }
            } else if pos.en_passant == Some(to) {
                out.push(Move::new(from, to));
            }
        }
    }
}

fn push_promotions(from: u8, to: u8, out: &mut Vec<Move>) {
    for pk in PieceKind::PROMOTIONS {
        out.push(Move::with_promo(from, to, pk));
    }
}

/// Knight and king: one step per delta onto an empty or enemy square.
fn gen_steps(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// One castling option: where the king lands, which squares must be empty
/// and which squares the king passes over.
struct CastleLane {
    king_to: u8,
    empty: &'static [u8],
    crossed: &'static [u8],
}

const WHITE_KINGSIDE: CastleLane = CastleLane {
    king_to: 6,
    empty: &[5, 6],
    crossed: &[5, 6],
};
const WHITE_QUEENSIDE: CastleLane = CastleLane {
    king_to: 2,
    empty: &[3, 2, 1],
    crossed: &[3, 2],
};
const BLACK_KINGSIDE: CastleLane = CastleLane {
    king_to: 62,
    empty: &[61, 62],
    crossed: &[61, 62],
};
const BLACK_QUEENSIDE: CastleLane = CastleLane {
    king_to: 58,
    empty: &[59, 58, 57],
    crossed: &[59, 58],
};

fn gen_castle(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let (king_from, lanes) = match c {
        Color::White => (
            4u8,
            [
                (pos.castling.wk, &WHITE_KINGSIDE),
                (pos.castling.wq, &WHITE_QUEENSIDE),
            ],
        ),
        Color::Black => (
            60u8,
            [
                (pos.castling.bk, &BLACK_KINGSIDE),
                (pos.castling.bq, &BLACK_QUEENSIDE),
            ],
        ),
    };
    // Never out of check, never through an attacked square.
    if from != king_from || pos.in_check(c) {
        return;
    }

    let enemy = c.other();
    for (allowed, lane) in lanes {
        if allowed
            && lane.empty.iter().all(|&s| pos.piece_at(s).is_none())
            && lane.crossed.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            out.push(Move::new(from, lane.king_to));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
