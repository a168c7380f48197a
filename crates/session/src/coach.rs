//! Plain-language hints computed from the position alone.

use std::fmt;

use chess_core::{legal_moves, Position, CENTER_SQUARES};

const LOW_ACTIVITY_MOVES: usize = 15;
const ENDGAME_PIECES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tip {
    CenterHeld,
    ContestCenter,
    IncreaseActivity,
    DefendCheck,
    Endgame,
    KeepTempo,
}

impl Tip {
    pub fn text(self) -> &'static str {
        match self {
            Tip::CenterHeld => "Center OK, keep tension on d4/e4/d5/e5.",
            Tip::ContestCenter => "Contest center: push a pawn or reroute a knight.",
            Tip::IncreaseActivity => "Increase activity: unpin pieces, open a file for rooks.",
            Tip::DefendCheck => "Defend first, then counter with tempo.",
            Tip::Endgame => "Endgame: activate king, create passed pawn.",
            Tip::KeepTempo => "Good plan, keep tempo.",
        }
    }
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Attackers of the four center squares by the side to move minus those of
/// the opponent.
pub fn center_control(pos: &Position) -> i32 {
    let us = pos.side_to_move;
    CENTER_SQUARES
        .iter()
        .map(|&sq| pos.attackers(sq, us) as i32 - pos.attackers(sq, us.other()) as i32)
        .sum()
}

/// Tips for the side to move, in a fixed order.
pub fn advise(pos: &Position) -> Vec<Tip> {
    let mut tips = Vec::new();

    let center = center_control(pos);
    if center > 0 {
        tips.push(Tip::CenterHeld);
    } else if center < 0 {
        tips.push(Tip::ContestCenter);
    }

    let moves = legal_moves(pos);
    let captures = moves.iter().filter(|&&m| pos.is_capture(m)).count();
    if captures == 0 && moves.len() < LOW_ACTIVITY_MOVES {
        tips.push(Tip::IncreaseActivity);
    }

    if pos.is_check() {
        tips.push(Tip::DefendCheck);
    }

    // The acknowledgement depends only on the first three criteria
    if tips.is_empty() {
        tips.push(Tip::KeepTempo);
    }

    if pos.piece_count() <= ENDGAME_PIECES {
        tips.push(Tip::Endgame);
    }
    tips
}

/// Tips joined into one line.
pub fn coach_text(tips: &[Tip]) -> String {
    tips.iter().map(|t| t.text()).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "coach_tests.rs"]
mod coach_tests;
