// Catalog constants
pub const TOTAL_LEVELS: u32 = 100;
pub const FIRST_LEVEL: u32 = 1;

// Star rating bounds
pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 3;
pub const PERFECT_TOTAL_STARS: u32 = TOTAL_LEVELS * MAX_STARS as u32;

// Level shape bounds
pub const MIN_COLORS: usize = 3;
pub const MAX_COLORS: usize = 8;
pub const MIN_CODE_LENGTH: usize = 3;
pub const MAX_CODE_LENGTH: usize = 6;

/// Color names in palette order. Level color counts index into the front of this list.
pub const COLOR_NAMES: &[&str] = &[
    "Red", "Blue", "Green", "Purple", "Yellow", "Orange", "Black", "White",
];

/// Single-letter codes for text entry, same order as `COLOR_NAMES`.
pub const COLOR_LETTERS: &[char] = &['r', 'b', 'g', 'p', 'y', 'o', 'k', 'w'];

/// Returns the display name of a palette color, or "Unknown" outside the palette.
pub fn color_name(color: usize) -> &'static str {
    COLOR_NAMES.get(color).copied().unwrap_or("Unknown")
}

/// Parses a palette letter (case-insensitive) into its color index.
pub fn color_from_letter(letter: char) -> Option<usize> {
    let letter = letter.to_ascii_lowercase();
    COLOR_LETTERS.iter().position(|&c| c == letter)
}

// Progress store keys
pub const KEY_HIGHEST_UNLOCKED: &str = "highest_unlocked";
pub const KEY_SOUND_ENABLED: &str = "sound_enabled";
pub const KEY_MUSIC_ENABLED: &str = "music_enabled";

pub fn level_stars_key(level: u32) -> String {
    format!("level_{level}_stars")
}

pub fn level_completed_key(level: u32) -> String {
    format!("level_{level}_completed")
}

// Stats store keys
pub const KEY_TOTAL_GAMES: &str = "stats_total_games";
pub const KEY_GAMES_WON: &str = "stats_games_won";
pub const KEY_GAMES_LOST: &str = "stats_games_lost";
pub const KEY_TOTAL_MOVES: &str = "stats_total_moves";
pub const KEY_TOTAL_TIME: &str = "stats_total_time";
pub const KEY_PERFECT_GAMES: &str = "stats_perfect_games";
pub const KEY_HINTS_USED: &str = "stats_hints_used";
pub const KEY_BEST_TIME: &str = "stats_best_time";
pub const KEY_CURRENT_STREAK: &str = "stats_current_streak";
pub const KEY_BEST_STREAK: &str = "stats_best_streak";

// Save files
pub const DATA_DIR_NAME: &str = ".mastermind";
pub const DATA_DIR_ENV: &str = "MASTERMIND_HOME";
pub const PROGRESS_FILE: &str = "progress.json";
pub const STATS_FILE: &str = "stats.json";
