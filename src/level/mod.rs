//! Level configurations: difficulty bands and the fixed 100-level catalog.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
