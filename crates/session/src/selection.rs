//! Human move input: which square is picked up and where it may go.
//!
//! [`Selection::on_click`] only decides what a click means. The session
//! applies the resulting move and moves the state on.

use std::time::{Duration, Instant};

use chess_core::{legal_moves_from, Move, PieceKind, Position};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        origin: u8,
        destinations: Vec<u8>,
    },
    AwaitingPromotion {
        origin: u8,
        destination: u8,
        deadline: Instant,
    },
    GameOver,
}

/// What a click asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    /// Nothing changes
    Ignore,
    /// Pick up the piece on `origin`
    Select { origin: u8, destinations: Vec<u8> },
    /// Drop the current selection
    Clear,
    /// Play this move
    Play(Move),
    /// A pawn reaches the last rank; ask which piece
    AskPromotion { origin: u8, destination: u8 },
}

impl Selection {
    /// Start selecting `origin` if it holds a side-to-move piece. A piece
    /// with no legal moves is selected with no destinations.
    pub fn select(pos: &Position, origin: u8) -> Option<Selection> {
        let own = pos.piece_at(origin)?.color == pos.side_to_move;
        if !own {
            return None;
        }
        Some(Selection::Selected {
            origin,
            destinations: destinations_from(pos, origin),
        })
    }

    pub fn on_click(&self, pos: &Position, sq: u8) -> ClickAction {
        match self {
            Selection::GameOver | Selection::AwaitingPromotion { .. } => ClickAction::Ignore,
            Selection::Idle => match Selection::select(pos, sq) {
                Some(Selection::Selected {
                    origin,
                    destinations,
                }) => ClickAction::Select {
                    origin,
                    destinations,
                },
                _ => ClickAction::Ignore,
            },
            Selection::Selected {
                origin,
                destinations,
            } => {
                if destinations.contains(&sq) {
                    let mv = Move::new(*origin, sq);
                    if pos.is_promotion(mv) {
                        ClickAction::AskPromotion {
                            origin: *origin,
                            destination: sq,
                        }
                    } else {
                        ClickAction::Play(mv)
                    }
                } else {
                    // Switch only to a piece that can move
                    match Selection::select(pos, sq) {
                        Some(Selection::Selected {
                            origin,
                            destinations,
                        }) if !destinations.is_empty() => ClickAction::Select {
                            origin,
                            destinations,
                        },
                        _ => ClickAction::Clear,
                    }
                }
            }
        }
    }

    pub fn awaiting_promotion(origin: u8, destination: u8, now: Instant, timeout: Duration) -> Self {
        Selection::AwaitingPromotion {
            origin,
            destination,
            deadline: now + timeout,
        }
    }

    /// The promotion move to play once `now` has passed the deadline.
    pub fn expired_promotion(&self, now: Instant) -> Option<Move> {
        match *self {
            Selection::AwaitingPromotion {
                origin,
                destination,
                deadline,
            } if now >= deadline => Some(Move::with_promo(origin, destination, PieceKind::Queen)),
            _ => None,
        }
    }

    /// Selected origin and destinations, for highlighting.
    pub fn highlighted(&self) -> Option<(u8, &[u8])> {
        match self {
            Selection::Selected {
                origin,
                destinations,
            } => Some((*origin, destinations)),
            _ => None,
        }
    }
}

/// Distinct target squares of the legal moves starting on `origin`, ascending.
pub fn destinations_from(pos: &Position, origin: u8) -> Vec<u8> {
    let mut targets: Vec<u8> = legal_moves_from(pos, origin).iter().map(|m| m.to).collect();
    targets.sort_unstable();
    targets.dedup();
    targets
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod selection_tests;
