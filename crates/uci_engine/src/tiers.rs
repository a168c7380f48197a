//! The three playing strengths and the engine that dispatches to them.

use std::fmt;

use chess_core::{legal_moves, Engine, Position, SearchLimits, SearchResult};
use classical_engine::ClassicalEngine;
use random_engine::{HeuristicEngine, RandomEngine};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Playing strength, weakest first. Serialized as its level number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Capture/center preference with random tie-break
    Heuristic = 1,
    /// One-ply greedy evaluation
    #[default]
    Greedy = 2,
    /// Depth-2 alpha-beta minimax
    Minimax = 3,
}

impl Tier {
    pub const MAX: Tier = Tier::Minimax;

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Cycle 1 → 2 → 3 → 1.
    pub fn next(self) -> Tier {
        match self {
            Tier::Heuristic => Tier::Greedy,
            Tier::Greedy => Tier::Minimax,
            Tier::Minimax => Tier::Heuristic,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Tier::Heuristic),
            2 => Ok(Tier::Greedy),
            3 => Ok(Tier::Minimax),
            other => Err(format!("tier must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.level()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Engine for a [`Tier`]. When the minimax tier returns no move while legal
/// moves exist, a uniformly random legal move is played instead.
pub struct TierEngine {
    tier: Tier,
    heuristic: HeuristicEngine,
    greedy: ClassicalEngine,
    minimax: ClassicalEngine,
    fallback: RandomEngine,
}

impl TierEngine {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            heuristic: HeuristicEngine::new(),
            greedy: ClassicalEngine::greedy(),
            minimax: ClassicalEngine::alpha_beta(),
            fallback: RandomEngine::new(),
        }
    }

    /// Seeded randomness for the heuristic tier and the fallback.
    pub fn with_seed(tier: Tier, seed: u64) -> Self {
        Self {
            heuristic: HeuristicEngine::with_seed(seed),
            fallback: RandomEngine::with_seed(seed.wrapping_add(1)),
            ..Self::new(tier)
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.tier = tier;
    }
}

impl Engine for TierEngine {
    fn search(&mut self, pos: &Position, limits: SearchLimits) -> SearchResult {
        let result = match self.tier {
            Tier::Heuristic => self.heuristic.search(pos, limits.clone()),
            Tier::Greedy => self.greedy.search(pos, limits.clone()),
            Tier::Minimax => self.minimax.search(pos, limits.clone()),
        };

        if result.best_move.is_none() && self.tier == Tier::Minimax && !legal_moves(pos).is_empty()
        {
            warn!(fen = %pos.to_fen(), "minimax returned no move, playing a random one");
            return SearchResult {
                best_move: self.fallback.search(pos, limits).best_move,
                ..result
            };
        }
        result
    }

    fn name(&self) -> &str {
        match self.tier {
            Tier::Heuristic => self.heuristic.name(),
            Tier::Greedy => self.greedy.name(),
            Tier::Minimax => self.minimax.name(),
        }
    }

    fn new_game(&mut self) {
        self.greedy.new_game();
        self.minimax.new_game();
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("tier") {
            return false;
        }
        match value.parse::<u8>().ok().and_then(|l| Tier::try_from(l).ok()) {
            Some(tier) => {
                self.tier = tier;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[path = "tiers_tests.rs"]
mod tiers_tests;
