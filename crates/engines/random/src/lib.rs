//! Randomized move choice.
//!
//! [`RandomEngine`] picks uniformly among legal moves and is the fallback
//! when a deeper search comes back empty-handed. [`HeuristicEngine`] is the
//! weakest playing tier: it prefers captures and central squares, with a
//! random tie-break.

use chess_core::{is_center, legal_moves, Engine, Move, Position, SearchLimits, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};


const CAPTURE_WEIGHT: f64 = 5.0;
const CENTER_WEIGHT: f64 = 2.0;

/// Uniformly random legal move, `None` when there is none.
pub fn random_move<R: Rng + ?Sized>(pos: &Position, rng: &mut R) -> Option<Move> {
    legal_moves(pos).choose(rng).copied()
}

/// Heuristic score of a single move: capture and center bonuses plus
/// uniform noise in `[0, 1)`.
pub fn heuristic_score<R: Rng + ?Sized>(pos: &Position, mv: Move, rng: &mut R) -> f64 {
    let mut score = 0.0;
    if pos.is_capture(mv) {
        score += CAPTURE_WEIGHT;
    }
    if is_center(mv.to) {
        score += CENTER_WEIGHT;
    }
    score + rng.gen::<f64>()
}

/// Plays uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        SearchResult {
            best_move: random_move(pos, &mut self.rng),
            score: 0,
            depth: 1,
            nodes: 1,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}

/// Capture-and-center preference with random tie-breaking.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic choices for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Highest-scoring legal move; the first one wins an exact tie.
    pub fn choose(&mut self, pos: &Position) -> Option<Move> {
        let moves = legal_moves(pos);
        let mut best: Option<(Move, f64)> = None;
        for mv in moves {
            let score = heuristic_score(pos, mv, &mut self.rng);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for HeuristicEngine {
    fn search(&mut self, pos: &Position, _limits: SearchLimits) -> SearchResult {
        let best_move = self.choose(pos);
        SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: legal_moves(pos).len() as u64,
            stopped: false,
        }
    }

    fn name(&self) -> &str {
        "Heuristic v1.0"
    }
}
