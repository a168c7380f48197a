//! Everything a front end needs to draw one frame.

use serde::Serialize;

/// Evaluation is shown as a bar filled from the bottom: 0.0 means Black is
/// five pawns or more ahead, 1.0 the same for White.
pub fn eval_fraction(centipawns: i32) -> f64 {
    let pawns = (f64::from(centipawns) / 100.0).clamp(-5.0, 5.0);
    (pawns + 5.0) / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// "White" or "Black"
    pub active_side: String,
    /// "", "check", "checkmate", "stalemate", "draw", "white flag fell" or
    /// "black flag fell"
    pub status: String,
    /// `MM:SS`
    pub white_clock: String,
    pub black_clock: String,
    /// Last move in UCI text
    pub last_move: Option<String>,
    pub evaluation: i32,
    pub eval_fraction: f64,
    pub coach_text: String,
    pub ai_tier: u8,
    pub ai_white: bool,
    pub ai_black: bool,
    pub selected: Option<String>,
    pub targets: Vec<String>,
    pub awaiting_promotion: bool,
    /// The side to move may claim a draw
    pub draw_claimable: bool,
    pub fen: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_fraction() {
        assert_eq!(eval_fraction(0), 0.5);
        assert_eq!(eval_fraction(250), 0.75);
        assert_eq!(eval_fraction(-100_000), 0.0);
        assert_eq!(eval_fraction(99_999), 1.0);
    }
}
