//! Played moves in order, with what is needed to take them back.

use chess_core::{Move, Position, Undo};

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub mv: Move,
    pub undo: Undo,
    /// Hash of the position reached by `mv`
    pub hash: u64,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move, undo: Undo, hash: u64) {
        self.entries.push(HistoryEntry { mv, undo, hash });
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn moves(&self) -> Vec<Move> {
        self.entries.iter().map(|e| e.mv).collect()
    }

    /// How many times `hash` occurs among `initial_hash` and every position
    /// reached so far.
    pub fn occurrences(&self, initial_hash: u64, hash: u64) -> usize {
        usize::from(initial_hash == hash) + self.entries.iter().filter(|e| e.hash == hash).count()
    }

    /// Replay every move from `initial`.
    pub fn replay(&self, initial: &Position) -> Position {
        let mut pos = initial.clone();
        for e in &self.entries {
            pos.make_move(e.mv);
        }
        pos
    }
}
