use chess_core::{legal_moves, legal_moves_into, Color, Move, Position, TimeControl};

use crate::eval::evaluate;

/// Best score and move found below a node. `best_move` is `None` at leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub score: i32,
    pub best_move: Option<Move>,
}

impl Line {
    fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Node counter and stop flag threaded through a search.
pub struct SearchContext<'a> {
    pub nodes: u64,
    pub stopped: bool,
    time_control: Option<&'a TimeControl>,
}

impl<'a> SearchContext<'a> {
    pub fn new(time_control: Option<&'a TimeControl>) -> Self {
        Self {
            nodes: 0,
            stopped: false,
            time_control,
        }
    }

    fn visit(&mut self) {
        self.nodes += 1;
        if let Some(tc) = self.time_control {
            if tc.should_check_time(self.nodes) && tc.check_time() {
                self.stopped = true;
            }
        }
    }
}

/// Positions the tree search treats as leaves regardless of depth.
fn is_terminal(pos: &Position) -> bool {
    pos.is_checkmate()
        || pos.is_stalemate()
        || pos.is_insufficient_material()
        || pos.is_seventy_five_move_draw()
}

/// One ply: play each move, evaluate, keep the best for the mover.
/// White keeps the highest score, Black the lowest; ties keep the earlier move.
pub fn greedy(pos: &Position, ctx: &mut SearchContext) -> Option<(Move, i32)> {
    let mut scratch = pos.clone();
    let maximizing = pos.side_to_move == Color::White;
    let mut best: Option<(Move, i32)> = None;

    for mv in legal_moves(pos) {
        ctx.visit();
        let undo = scratch.make_move(mv);
        let score = evaluate(&scratch);
        scratch.unmake_move(mv, undo);

        let better = match best {
            None => true,
            Some((_, b)) if maximizing => score > b,
            Some((_, b)) => score < b,
        };
        if better {
            best = Some((mv, score));
        }
    }
    best
}

/// Minimax with alpha-beta pruning. White maximizes.
///
/// Cuts off as soon as `beta <= alpha`. A stopped search returns the best
/// line completed so far.
pub fn alpha_beta(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    ctx: &mut SearchContext,
) -> Line {
    ctx.visit();
    if depth == 0 || is_terminal(pos) || ctx.stopped {
        return Line::leaf(evaluate(pos));
    }

    let maximizing = pos.side_to_move == Color::White;
    let mut best = Line::leaf(if maximizing { i32::MIN } else { i32::MAX });
    let mut moves = Vec::with_capacity(48);
    legal_moves_into(pos, &mut moves);

    for mv in moves {
        let undo = pos.make_move(mv);
        let score = alpha_beta(pos, depth - 1, alpha, beta, ctx).score;
        pos.unmake_move(mv, undo);

        if maximizing {
            if score > best.score {
                best = Line {
                    score,
                    best_move: Some(mv),
                };
            }
            alpha = alpha.max(score);
        } else {
            if score < best.score {
                best = Line {
                    score,
                    best_move: Some(mv),
                };
            }
            beta = beta.min(score);
        }
        if beta <= alpha || ctx.stopped {
            break;
        }
    }
    best
}

/// Plain minimax without pruning. Same value as [`alpha_beta`] at the root;
/// kept for cross-checking the pruned search.
pub fn minimax(pos: &mut Position, depth: u8, ctx: &mut SearchContext) -> Line {
    ctx.visit();
    if depth == 0 || is_terminal(pos) {
        return Line::leaf(evaluate(pos));
    }

    let maximizing = pos.side_to_move == Color::White;
    let mut best = Line::leaf(if maximizing { i32::MIN } else { i32::MAX });
    let mut moves = Vec::with_capacity(48);
    legal_moves_into(pos, &mut moves);

    for mv in moves {
        let undo = pos.make_move(mv);
        let score = minimax(pos, depth - 1, ctx).score;
        pos.unmake_move(mv, undo);

        let better = if maximizing {
            score > best.score
        } else {
            score < best.score
        };
        if better {
            best = Line {
                score,
                best_move: Some(mv),
            };
        }
    }
    best
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
