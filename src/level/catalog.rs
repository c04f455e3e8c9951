//! The fixed catalog of 100 levels.
//!
//! Tutorial and Master levels are hand-authored tables. Easy through Expert
//! are derived from the level number by the band functions below, so each band
//! can be checked on its own.

use super::{Difficulty, Level};
use crate::constants::TOTAL_LEVELS;
use crate::error::{MastermindError, Result};

/// Hand-authored row of the Tutorial or Master tables.
struct AuthoredLevel {
    number: u32,
    name: &'static str,
    num_colors: usize,
    code_length: usize,
    max_turns: usize,
    allow_duplicates: bool,
    hints: u32,
    time_limit: u32,
    three_stars: usize,
    two_stars: usize,
}

const TUTORIAL_TABLE: &[AuthoredLevel] = &[
    AuthoredLevel {
        number: 1,
        name: "First Steps",
        num_colors: 3,
        code_length: 3,
        max_turns: 10,
        allow_duplicates: false,
        hints: 5,
        time_limit: 0,
        three_stars: 4,
        two_stars: 6,
    },
    AuthoredLevel {
        number: 2,
        name: "Getting Warmer",
        num_colors: 4,
        code_length: 3,
        max_turns: 10,
        allow_duplicates: false,
        hints: 4,
        time_limit: 0,
        three_stars: 5,
        two_stars: 7,
    },
    AuthoredLevel {
        number: 3,
        name: "Four Is More",
        num_colors: 4,
        code_length: 4,
        max_turns: 10,
        allow_duplicates: false,
        hints: 3,
        time_limit: 0,
        three_stars: 5,
        two_stars: 7,
    },
    AuthoredLevel {
        number: 4,
        name: "Color Burst",
        num_colors: 5,
        code_length: 4,
        max_turns: 10,
        allow_duplicates: false,
        hints: 3,
        time_limit: 0,
        three_stars: 6,
        two_stars: 8,
    },
    AuthoredLevel {
        number: 5,
        name: "Tutorial Complete",
        num_colors: 6,
        code_length: 4,
        max_turns: 10,
        allow_duplicates: false,
        hints: 2,
        time_limit: 0,
        three_stars: 6,
        two_stars: 8,
    },
];

const MASTER_TABLE: &[AuthoredLevel] = &[
    AuthoredLevel {
        number: 91,
        name: "Master: Speed Run",
        num_colors: 8,
        code_length: 4,
        max_turns: 8,
        allow_duplicates: true,
        hints: 0,
        time_limit: 120,
        three_stars: 5,
        two_stars: 6,
    },
    AuthoredLevel {
        number: 92,
        name: "Master: Long Code",
        num_colors: 8,
        code_length: 6,
        max_turns: 15,
        allow_duplicates: true,
        hints: 1,
        time_limit: 0,
        three_stars: 9,
        two_stars: 12,
    },
    AuthoredLevel {
        number: 93,
        name: "Master: No Hints",
        num_colors: 8,
        code_length: 5,
        max_turns: 12,
        allow_duplicates: true,
        hints: 0,
        time_limit: 0,
        three_stars: 7,
        two_stars: 10,
    },
    AuthoredLevel {
        number: 94,
        name: "Master: Time Trial",
        num_colors: 7,
        code_length: 4,
        max_turns: 10,
        allow_duplicates: true,
        hints: 0,
        time_limit: 90,
        three_stars: 5,
        two_stars: 7,
    },
    AuthoredLevel {
        number: 95,
        name: "Master: Rainbow",
        num_colors: 8,
        code_length: 5,
        max_turns: 10,
        allow_duplicates: false,
        hints: 0,
        time_limit: 0,
        three_stars: 6,
        two_stars: 8,
    },
    AuthoredLevel {
        number: 96,
        name: "Master: Precision",
        num_colors: 8,
        code_length: 5,
        max_turns: 8,
        allow_duplicates: true,
        hints: 1,
        time_limit: 0,
        three_stars: 5,
        two_stars: 6,
    },
    AuthoredLevel {
        number: 97,
        name: "Master: Marathon",
        num_colors: 8,
        code_length: 6,
        max_turns: 20,
        allow_duplicates: true,
        hints: 2,
        time_limit: 300,
        three_stars: 10,
        two_stars: 15,
    },
    AuthoredLevel {
        number: 98,
        name: "Master: Ultimate",
        num_colors: 8,
        code_length: 6,
        max_turns: 12,
        allow_duplicates: true,
        hints: 0,
        time_limit: 0,
        three_stars: 8,
        two_stars: 10,
    },
    AuthoredLevel {
        number: 99,
        name: "Master: Gauntlet",
        num_colors: 8,
        code_length: 5,
        max_turns: 10,
        allow_duplicates: true,
        hints: 0,
        time_limit: 150,
        three_stars: 6,
        two_stars: 8,
    },
    AuthoredLevel {
        number: 100,
        name: "MASTERMIND",
        num_colors: 8,
        code_length: 6,
        max_turns: 10,
        allow_duplicates: true,
        hints: 0,
        time_limit: 180,
        three_stars: 6,
        two_stars: 8,
    },
];

fn authored_level(row: &AuthoredLevel, difficulty: Difficulty) -> Result<Level> {
    Level::builder(row.number)
        .name(row.name)
        .difficulty(difficulty)
        .num_colors(row.num_colors)
        .code_length(row.code_length)
        .max_turns(row.max_turns)
        .allow_duplicates(row.allow_duplicates)
        .hints(row.hints)
        .time_limit(row.time_limit)
        .stars(row.three_stars, row.two_stars)
        .build()
}

/// Easy band (6-25): 4/5/6 colors repeating, 4 pegs, no duplicates.
pub fn easy_level(i: u32) -> Result<Level> {
    Level::builder(i)
        .name(format!("Easy {}", i - 5))
        .difficulty(Difficulty::Easy)
        .num_colors(4 + (i % 3) as usize)
        .code_length(4)
        .max_turns(10)
        .hints(2)
        .stars(5, 7)
        .build()
}

/// Medium band (26-50): 5-8 colors, duplicates on even levels.
pub fn medium_level(i: u32) -> Result<Level> {
    let duplicates = i % 2 == 0;
    Level::builder(i)
        .name(format!("Medium {}", i - 25))
        .difficulty(Difficulty::Medium)
        .num_colors(5 + (i % 4) as usize)
        .code_length(4)
        .max_turns(10)
        .allow_duplicates(duplicates)
        .hints(if duplicates { 2 } else { 1 })
        .stars(6, 8)
        .build()
}

/// Hard band (51-75): 6-8 colors, 4 or 5 pegs, every fifth level timed.
pub fn hard_level(i: u32) -> Result<Level> {
    let code_length = 4 + (i % 2) as usize;
    let long = code_length == 5;
    Level::builder(i)
        .name(format!("Hard {}", i - 50))
        .difficulty(Difficulty::Hard)
        .num_colors(6 + (i % 3) as usize)
        .code_length(code_length)
        .max_turns(if long { 12 } else { 10 })
        .allow_duplicates(true)
        .hints(1)
        .time_limit(if i % 5 == 0 { 180 } else { 0 })
        .stars(if long { 7 } else { 6 }, if long { 9 } else { 8 })
        .build()
}

/// Expert band (76-90): 8 colors, code length ramps 4 to 6, every third level timed.
pub fn expert_level(i: u32) -> Result<Level> {
    let code_length = (4 + ((i - 75) / 5) as usize).min(6);
    Level::builder(i)
        .name(format!("Expert {}", i - 75))
        .difficulty(Difficulty::Expert)
        .num_colors(8)
        .code_length(code_length)
        .max_turns(code_length + 8)
        .allow_duplicates(true)
        .hints(if code_length >= 5 { 1 } else { 0 })
        .time_limit(if i % 3 == 0 { 240 } else { 0 })
        .stars(7, 10)
        .build()
}

/// Read-only table of every level, ordered by level number.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

/// Every level in order, each built through the checked builder.
fn build_levels() -> Result<Vec<Level>> {
    TUTORIAL_TABLE
        .iter()
        .map(|row| authored_level(row, Difficulty::Tutorial))
        .chain(Difficulty::Easy.levels().map(easy_level))
        .chain(Difficulty::Medium.levels().map(medium_level))
        .chain(Difficulty::Hard.levels().map(hard_level))
        .chain(Difficulty::Expert.levels().map(expert_level))
        .chain(
            MASTER_TABLE
                .iter()
                .map(|row| authored_level(row, Difficulty::Master)),
        )
        .collect()
}

impl LevelCatalog {
    pub fn new() -> Self {
        let levels = build_levels().expect("built-in levels satisfy the level rules");
        debug_assert_eq!(levels.len(), TOTAL_LEVELS as usize);
        Self { levels }
    }

    /// Level `n`, for `n` in 1..=100.
    pub fn get_level(&self, n: u32) -> Result<&Level> {
        if !(1..=TOTAL_LEVELS).contains(&n) {
            return Err(MastermindError::LevelOutOfRange(n));
        }
        self.levels
            .get((n - 1) as usize)
            .ok_or(MastermindError::LevelOutOfRange(n))
    }

    pub fn all_levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn total_levels(&self) -> u32 {
        TOTAL_LEVELS
    }

    /// Levels belonging to one difficulty band.
    pub fn levels_in(&self, difficulty: Difficulty) -> impl Iterator<Item = &Level> {
        self.levels
            .iter()
            .filter(move |l| l.difficulty() == difficulty)
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::new()
    }
}
