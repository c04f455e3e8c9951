//! Puzzle engine: code generation, peg scoring and the game session state machine.

pub mod game;
pub mod logic;
pub mod types;

pub use game::*;
pub use logic::*;
pub use types::*;
