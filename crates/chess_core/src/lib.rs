//! Board rules shared by every crate in the workspace: position, legal move
//! generation, notation (UCI text, SAN, PGN) and the [`Engine`] seam the
//! move-choosing tiers plug into.

pub mod attacks;
pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod pgn;
pub mod time_control;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use attacks::*;
pub use board::*;
pub use error::ChessError;
pub use movegen::*;
pub use perft::{perft, perft_divide};
pub use pgn::{PgnGame, move_to_san, parse_movetext, read_pgn, san_to_move, write_pgn};
pub use time_control::*;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by every move-choosing strategy
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The chosen move (None if there are no legal moves)
    pub best_move: Option<Move>,
    /// Score in centipawns, positive favours White
    pub score: i32,
    /// Search depth reached
    pub depth: u8,
    /// Number of nodes visited
    pub nodes: u64,
    /// Whether the search was cut short by its time limit
    pub stopped: bool,
}

/// A move-choosing strategy.
///
/// Implementations must only ever return a move from `legal_moves(pos)`,
/// or `None` when that list is empty.
pub trait Engine: Send {
    /// Choose a move for the side to move in `pos`.
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult;

    /// Name reported over UCI and in PGN player tags.
    fn name(&self) -> &str;

    fn author(&self) -> &str {
        "chess-coach"
    }

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}

    /// Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
