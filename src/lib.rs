//! Mastermind HD - puzzle engine library
//!
//! The level catalog, the game session engine and progress tracking, free of
//! any rendering or input layer. Front ends construct these explicitly and
//! drive them through the public API.

pub mod constants;
pub mod engine;
pub mod error;
pub mod level;
pub mod progress;
pub mod utils;

pub use engine::{Feedback, GameStatus, GuessRecord, Hint, PuzzleEngine};
pub use error::{ErrorKind, MastermindError, Result};
pub use level::{Difficulty, Level, LevelCatalog};
pub use progress::{
    GameRecord, JsonFileStore, KeyValueStore, MemoryStore, Milestone, ProgressStore, StatsStore,
};
