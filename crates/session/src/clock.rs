//! Two countdown clocks driven by elapsed wall-clock time.

use chess_core::Color;

const MINUTE: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    white: f64,
    black: f64,
}

impl Clock {
    pub fn new(initial_secs: f64) -> Self {
        let initial_secs = initial_secs.max(0.0);
        Self {
            white: initial_secs,
            black: initial_secs,
        }
    }

    pub fn remaining(&self, side: Color) -> f64 {
        match side {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Charge `elapsed` seconds to `side`. Returns the side whose flag fell,
    /// if either clock is now at zero.
    pub fn tick(&mut self, side: Color, elapsed: f64) -> Option<Color> {
        let elapsed = elapsed.max(0.0);
        let slot = match side {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        *slot = (*slot - elapsed).max(0.0);
        self.flagged()
    }

    /// The first side (White checked first) with no time left.
    pub fn flagged(&self) -> Option<Color> {
        if self.white <= 0.0 {
            Some(Color::White)
        } else if self.black <= 0.0 {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Add (positive) or remove (negative) whole minutes from both sides.
    /// Removing never takes a clock below one minute.
    pub fn adjust_both(&mut self, minutes: i32) {
        let delta = f64::from(minutes) * MINUTE;
        for slot in [&mut self.white, &mut self.black] {
            *slot = if delta < 0.0 {
                (*slot + delta).max(MINUTE)
            } else {
                *slot + delta
            };
        }
    }

    pub fn reset(&mut self, initial_secs: f64) {
        *self = Self::new(initial_secs);
    }
}

/// `MM:SS`, truncating fractions of a second.
pub fn format_clock(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod clock_tests;
