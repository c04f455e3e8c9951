//! Puzzle engine data structures.

/// Peg feedback for one completed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Feedback {
    /// Correct color in the correct position
    pub black_pegs: usize,
    /// Correct color in the wrong position
    pub white_pegs: usize,
}

impl Feedback {
    pub fn new(black_pegs: usize, white_pegs: usize) -> Self {
        Self {
            black_pegs,
            white_pegs,
        }
    }

    pub fn is_win(&self, code_length: usize) -> bool {
        self.black_pegs == code_length
    }
}

/// Lifecycle state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A completed row: the guess and the feedback it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub guess: Vec<usize>,
    pub feedback: Feedback,
}

/// Color revealed by a hint, and the slot of the current row it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub position: usize,
    pub color: usize,
}
