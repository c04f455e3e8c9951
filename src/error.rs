//! Error type shared by the engine, catalog and stores.

use std::fmt;
use std::io;

/// Broad category of a [`MastermindError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller passed a value outside the accepted range.
    InvalidArgument,
    /// Operation is not allowed in the current state.
    InvalidState,
    /// The backing store failed to commit.
    Persistence,
}

#[derive(Debug)]
pub enum MastermindError {
    ColorOutOfRange { color: usize, num_colors: usize },
    WrongGuessLength { expected: usize, actual: usize },
    StarsOutOfRange(u8),
    LevelOutOfRange(u32),
    /// A level configuration breaks one of the level shape rules.
    InvalidLevel { level: u32, reason: &'static str },
    GameOver,
    Persistence(io::Error),
}

impl MastermindError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ColorOutOfRange { .. }
            | Self::WrongGuessLength { .. }
            | Self::StarsOutOfRange(_)
            | Self::LevelOutOfRange(_)
            | Self::InvalidLevel { .. } => ErrorKind::InvalidArgument,
            Self::GameOver => ErrorKind::InvalidState,
            Self::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl fmt::Display for MastermindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColorOutOfRange { color, num_colors } => {
                write!(f, "Invalid color index {color}, expected 0..{num_colors}")
            }
            Self::WrongGuessLength { expected, actual } => {
                write!(f, "Guess must contain exactly {expected} colors, got {actual}")
            }
            Self::StarsOutOfRange(stars) => {
                write!(f, "Stars must be between 1 and 3, got {stars}")
            }
            Self::LevelOutOfRange(level) => {
                write!(f, "Level number must be between 1 and 100, got {level}")
            }
            Self::InvalidLevel { level, reason } => {
                write!(f, "Level {level} is misconfigured: {reason}")
            }
            Self::GameOver => write!(f, "Game is over. Start a new game."),
            Self::Persistence(e) => write!(f, "Failed to save progress: {e}"),
        }
    }
}

impl std::error::Error for MastermindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MastermindError {
    fn from(e: io::Error) -> Self {
        Self::Persistence(e)
    }
}

pub type Result<T> = std::result::Result<T, MastermindError>;
