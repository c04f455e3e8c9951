//! Level configuration data structures.

use crate::constants::{MAX_CODE_LENGTH, MAX_COLORS, MIN_CODE_LENGTH, MIN_COLORS};
use crate::error::{MastermindError, Result};
use std::ops::RangeInclusive;

/// Difficulty band a level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Tutorial,
    Easy,
    Medium,
    Hard,
    Expert,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 6] = [
        Difficulty::Tutorial,
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Master,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tutorial => "Tutorial",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::Master => "Master",
        }
    }

    /// Contiguous level numbers covered by this band.
    pub fn levels(&self) -> RangeInclusive<u32> {
        match self {
            Self::Tutorial => 1..=5,
            Self::Easy => 6..=25,
            Self::Medium => 26..=50,
            Self::Hard => 51..=75,
            Self::Expert => 76..=90,
            Self::Master => 91..=100,
        }
    }

    /// Band containing `level_number`, if it is a catalog level.
    pub fn for_level(level_number: u32) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.levels().contains(&level_number))
    }
}

/// Immutable configuration of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    level_number: u32,
    name: String,
    difficulty: Difficulty,
    num_colors: usize,
    code_length: usize,
    max_turns: usize,
    allow_duplicates: bool,
    hints_available: u32,
    timed: bool,
    time_limit_seconds: u32,
    three_star_moves: usize,
    two_star_moves: usize,
}

impl Level {
    pub fn builder(level_number: u32) -> LevelBuilder {
        LevelBuilder::new(level_number)
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    pub fn hints_available(&self) -> u32 {
        self.hints_available
    }

    pub fn is_timed(&self) -> bool {
        self.timed
    }

    /// Time limit in seconds, 0 when untimed.
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    pub fn three_star_moves(&self) -> usize {
        self.three_star_moves
    }

    pub fn two_star_moves(&self) -> usize {
        self.two_star_moves
    }

    /// Star rating for a win that took `moves_used` turns.
    pub fn star_rating(&self, moves_used: usize) -> u8 {
        if moves_used <= self.three_star_moves {
            3
        } else if moves_used <= self.two_star_moves {
            2
        } else {
            1
        }
    }
}

/// Builder for [`Level`]. Defaults describe a plain 4-color, 4-peg, 10-turn game.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    level: Level,
}

impl LevelBuilder {
    pub fn new(level_number: u32) -> Self {
        Self {
            level: Level {
                level_number,
                name: format!("Level {level_number}"),
                difficulty: Difficulty::Easy,
                num_colors: 4,
                code_length: 4,
                max_turns: 10,
                allow_duplicates: false,
                hints_available: 3,
                timed: false,
                time_limit_seconds: 0,
                three_star_moves: 5,
                two_star_moves: 7,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.level.name = name.into();
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.level.difficulty = difficulty;
        self
    }

    pub fn num_colors(mut self, num_colors: usize) -> Self {
        self.level.num_colors = num_colors;
        self
    }

    pub fn code_length(mut self, code_length: usize) -> Self {
        self.level.code_length = code_length;
        self
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.level.max_turns = max_turns;
        self
    }

    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.level.allow_duplicates = allow;
        self
    }

    pub fn hints(mut self, hints: u32) -> Self {
        self.level.hints_available = hints;
        self
    }

    /// Makes the level timed with the given limit; 0 makes it untimed.
    pub fn time_limit(mut self, seconds: u32) -> Self {
        self.level.timed = seconds > 0;
        self.level.time_limit_seconds = seconds;
        self
    }

    pub fn stars(mut self, three_star_moves: usize, two_star_moves: usize) -> Self {
        self.level.three_star_moves = three_star_moves;
        self.level.two_star_moves = two_star_moves;
        self
    }

    /// Finish the level, rejecting shapes no game can be played on.
    pub fn build(self) -> Result<Level> {
        let level = self.level;
        let reason = if !(MIN_COLORS..=MAX_COLORS).contains(&level.num_colors) {
            Some("color count must be between 3 and 8")
        } else if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&level.code_length) {
            Some("code length must be between 3 and 6")
        } else if !level.allow_duplicates && level.num_colors < level.code_length {
            Some("too few colors for a code without duplicates")
        } else if level.max_turns == 0 {
            Some("at least one turn is required")
        } else if level.three_star_moves == 0 || level.three_star_moves >= level.two_star_moves {
            Some("three-star moves must be positive and below two-star moves")
        } else if level.two_star_moves > level.max_turns {
            Some("two-star moves cannot exceed the turn limit")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(MastermindError::InvalidLevel {
                level: level.level_number,
                reason,
            }),
            None => Ok(level),
        }
    }
}
