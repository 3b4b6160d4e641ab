//! Engine error type.
//!
//! Every failure in the engine is locally recoverable. The variants here
//! exist so callers can choose the recovery: redirect to setup on
//! `EmptyRoster`, start fresh on `CorruptSnapshot`, treat `OutOfCards`
//! as "already finished".

use thiserror::Error;

use crate::cards::CardId;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No cards left in the deck")]
    OutOfCards,

    #[error("A session needs at least one player")]
    EmptyRoster,

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Roster is full (max {max} players)")]
    RosterFull { max: usize },

    #[error("Invalid player name: {0}")]
    InvalidPlayerName(String),

    #[error("Unknown player")]
    UnknownPlayer,

    #[error("Duplicate card id in catalog: {0}")]
    DuplicateCard(CardId),

    #[error("At least one category must stay selected")]
    EmptyCategorySelection,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

impl EngineError {
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptSnapshot(msg.into())
    }

    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidPlayerName(msg.into())
    }

    /// The stored snapshot itself is unusable, as opposed to the store
    /// failing to read it.
    #[must_use]
    pub fn is_corrupt_snapshot(&self) -> bool {
        matches!(self, Self::CorruptSnapshot(_) | Self::Encoding(_))
    }
}
