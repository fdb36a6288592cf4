use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error("invalid card: {0}")]
    InvalidCard(String),

    #[error("duplicate card: {0} appears more than once across hole cards and board")]
    DuplicateCard(Card),

    #[error("invalid board size: {0} cards (expected 0, 3, 4 or 5)")]
    InvalidBoardSize(usize),

    #[error("card not found in deck: {0}")]
    CardNotFound(Card),

    #[error("deck exhausted")]
    DeckExhausted,

    #[error("five-card hand matched no category")]
    NoCategoryMatched,

    #[error("tie-break key lengths differ: {left} vs {right}")]
    KeyLengthMismatch { left: usize, right: usize },

    #[error("trial count must be positive, got {0}")]
    InvalidTrials(usize),

    #[error("computation cancelled before any trial completed")]
    NoTrialsCompleted,

    #[error("failed to serialize result: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for OddsError {
    fn from(e: serde_json::Error) -> Self {
        OddsError::Serialization(e.to_string())
    }
}

pub type OddsResult<T> = Result<T, OddsError>;
