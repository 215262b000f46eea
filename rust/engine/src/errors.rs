use thiserror::Error;

use crate::hand::HandCategory;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Malformed card: {0:?}")]
    Malformed(String),
    #[error("Unknown rank in card {0:?}")]
    UnknownRank(String),
    #[error("Unknown suit in card {0:?}")]
    UnknownSuit(String),
}

/// Failure to build a requested hand from a card pool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("No {category} available in the current pool")]
    Unavailable { category: HandCategory },
    #[error("Unknown hand category: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Hand incomplete: {held} of 5 cards held")]
    HandIncomplete { held: usize },
    #[error("Session is not actively playing")]
    NotPlaying,
    #[error("Level {level} is already closed")]
    LevelClosed { level: u32 },
    #[error("Power-up unavailable: no {category} in the deck")]
    PowerUpUnavailable { category: HandCategory },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Selection gate busy")]
    Busy,
    #[error(transparent)]
    Session(#[from] SessionError),
}
