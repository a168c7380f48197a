//! Evaluation-driven move choice: the one-ply greedy tier and the
//! alpha-beta minimax tier.

mod eval;
mod search;

use chess_core::{legal_moves, Engine, Position, SearchLimits, SearchResult};
use tracing::debug;

pub use eval::{evaluate, MATE_SCORE};
pub use search::{alpha_beta, greedy, minimax, Line, SearchContext};

/// Default tree depth of the minimax tier.
pub const DEFAULT_DEPTH: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Best immediate evaluation for the mover.
    Greedy,
    /// Alpha-beta minimax to `SearchLimits::depth`.
    AlphaBeta,
}

/// Engine wrapping either search strategy.
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    strategy: Strategy,
}

impl ClassicalEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    pub fn greedy() -> Self {
        Self::new(Strategy::Greedy)
    }

    pub fn alpha_beta() -> Self {
        Self::new(Strategy::AlphaBeta)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::alpha_beta()
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        limits.start();
        let mut ctx = SearchContext::new(Some(&limits.time_control));

        let (best_move, score, depth) = match self.strategy {
            Strategy::Greedy => match greedy(pos, &mut ctx) {
                Some((mv, score)) => (Some(mv), score, 1),
                None => (None, evaluate(pos), 0),
            },
            Strategy::AlphaBeta => {
                let mut scratch = pos.clone();
                let line = alpha_beta(&mut scratch, limits.depth, i32::MIN, i32::MAX, &mut ctx);
                (line.best_move, line.score, limits.depth)
            }
        };

        debug!(
            strategy = ?self.strategy,
            nodes = ctx.nodes,
            score,
            legal = legal_moves(pos).len(),
            "classical search finished"
        );

        SearchResult {
            best_move,
            score,
            depth,
            nodes: ctx.nodes,
            stopped: ctx.stopped,
        }
    }

    fn name(&self) -> &str {
        match self.strategy {
            Strategy::Greedy => "Greedy v1.0",
            Strategy::AlphaBeta => "AlphaBeta v1.0",
        }
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("strategy") {
            return false;
        }
        match value.to_ascii_lowercase().as_str() {
            "greedy" => self.strategy = Strategy::Greedy,
            "alphabeta" | "alpha_beta" => self.strategy = Strategy::AlphaBeta,
            _ => return false,
        }
        true
    }
}
