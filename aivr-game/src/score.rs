//! Running score for one session
//!
//! Only grows: there is no decrement and no reset. Never persisted.

use std::fmt;

/// Total and correct guess counts, `correct <= total` at all times
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    total: u64,
    correct: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one guess
    pub fn record_guess(&mut self, was_correct: bool) {
        self.total += 1;
        if was_correct {
            self.correct += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn correct(&self) -> u64 {
        self.correct
    }

    /// `"Score: {correct} / {total}"`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScoreTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} / {}", self.correct, self.total)
    }
}
