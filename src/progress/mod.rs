//! Persisted player state: level progress, statistics and the key-value
//! capability they are stored through.

pub mod level_progress;
pub mod stats;
pub mod store;

pub use level_progress::*;
pub use stats::*;
pub use store::*;
