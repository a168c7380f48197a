//! Computer turns.
//!
//! The session hands out an [`AiRequest`] carrying a snapshot of the
//! position and an [`AiTicket`]. The move may be computed anywhere (the CLI
//! uses a blocking worker thread) and is only accepted back if the ticket is
//! still current, so a move computed for a position that has since been
//! undone or reset is dropped.

use chess_core::{Engine, Move, Position, SearchLimits};
use classical_engine::DEFAULT_DEPTH;
use tracing::{debug, warn};
use uci_engine::{ExternalEngine, Tier, TierEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    /// Session generation when the request was made
    pub generation: u64,
    /// Hash of the position to move in
    pub hash: u64,
}

#[derive(Debug, Clone)]
pub struct AiRequest {
    pub ticket: AiTicket,
    pub position: Position,
    pub tier: Tier,
    pub external: Option<ExternalEngine>,
}

/// Picks moves for requests. Owns the tier engines so seeded randomness
/// carries across turns.
pub struct AiCoordinator {
    engine: TierEngine,
}

impl AiCoordinator {
    pub fn new() -> Self {
        Self {
            engine: TierEngine::new(Tier::default()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            engine: TierEngine::with_seed(Tier::default(), seed),
        }
    }

    /// A legal move for the request's position, or `None` if there is none.
    ///
    /// The external engine is tried first when configured; any failure
    /// there falls through to the internal tier.
    pub fn choose(&mut self, req: &AiRequest) -> Option<Move> {
        if let Some(external) = &req.external {
            match external.best_move(&req.position) {
                Ok(mv) => {
                    debug!(mv = %mv, engine = %external.path().display(), "external engine move");
                    return Some(mv);
                }
                Err(e) => warn!(error = %e, "external engine failed, using internal search"),
            }
        }

        self.engine.set_tier(req.tier);
        let result = self
            .engine
            .search(&req.position, SearchLimits::depth(DEFAULT_DEPTH));
        match result.best_move {
            Some(mv) => debug!(mv = %mv, tier = %req.tier, score = result.score, "internal move"),
            None => warn!(fen = %req.position.to_fen(), "no move available"),
        }
        result.best_move
    }

    pub fn new_game(&mut self) {
        self.engine.new_game();
    }
}

impl Default for AiCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
