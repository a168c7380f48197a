//! Static evaluation in centipawns, positive when White is better.

use chess_core::{is_center, legal_moves, Color, Position};

/// Score returned for a mated side. White being mated is `-MATE_SCORE`.
pub const MATE_SCORE: i32 = 99_999;

/// Material values indexed by `PieceKind::idx()`:
/// pawn, knight, bishop, rook, queen, king.
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

const CENTER_BONUS: i32 = 12;
const MOBILITY_WEIGHT: i32 = 2;
const CASTLING_BONUS: i32 = 10;

/// Evaluate `pos` from White's point of view.
///
/// Mobility is counted for the side to move only and signed by that side,
/// so the same placement scores differently with White or Black to move.
pub fn evaluate(pos: &Position) -> i32 {
    let moves = legal_moves(pos);
    if moves.is_empty() {
        if pos.is_check() {
            return match pos.side_to_move {
                Color::White => -MATE_SCORE,
                Color::Black => MATE_SCORE,
            };
        }
        return 0;
    }

    let mut score = 0i32;
    for (sq, pc) in pos.board.iter().enumerate() {
        let Some(pc) = pc else { continue };
        let mut value = PIECE_VALUES[pc.kind.idx()];
        if is_center(sq as u8) {
            value += CENTER_BONUS;
        }
        score += pc.color.sign() * value;
    }

    score += pos.side_to_move.sign() * MOBILITY_WEIGHT * moves.len() as i32;

    if pos.castling.any(Color::White) {
        score += CASTLING_BONUS;
    }
    if pos.castling.any(Color::Black) {
        score -= CASTLING_BONUS;
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
