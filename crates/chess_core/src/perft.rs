//! Move generator node counts, used to check the rules against published
//! reference numbers.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Number of leaf positions `depth` plies below `pos`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut buffers: Vec<Vec<Move>> = (0..depth).map(|_| Vec::with_capacity(48)).collect();
    count(pos, &mut buffers)
}

/// Per-root-move counts, sorted by move text. Handy for bisecting a
/// mismatch against another generator.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::with_capacity(48);
    legal_moves_into(pos, &mut roots);

    let mut out: Vec<(Move, u64)> = roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft(pos, depth - 1);
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect();
    out.sort_by_key(|(mv, _)| crate::uci::move_to_uci(*mv));
    out
}

// One move buffer per remaining ply, reused across siblings.
fn count(pos: &mut Position, buffers: &mut [Vec<Move>]) -> u64 {
    let Some((moves, deeper)) = buffers.split_first_mut() else {
        return 1;
    };
    moves.clear();
    legal_moves_into(pos, moves);
    if deeper.is_empty() {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &mv in moves.iter() {
        let undo = pos.make_move(mv);
        nodes += count(pos, deeper);
        pos.unmake_move(mv, undo);
    }
    nodes
}
