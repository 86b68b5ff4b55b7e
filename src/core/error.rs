use thiserror::Error;

use crate::core::types::Lane;

/// Setup and configuration failures.
///
/// These are defects in the fixed data or the host's configuration, not
/// player mistakes, so session construction bails out with them.
#[derive(Error, Debug)]
pub enum ConquestError {
    #[error("No eligible home city for the requested difficulty")]
    EmptyCandidatePool,

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConquestError>;

/// Rejected player command. A rejection never mutates the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("The campaign is over")]
    GameOver,

    #[error("Resolve the pending event first")]
    EventPending,

    #[error("No event is pending")]
    NoPendingEvent,

    #[error("Unknown event choice: {0}")]
    UnknownChoice(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Unknown lane: {0}")]
    UnknownLane(String),

    #[error("{0} is already under your control")]
    AlreadyOwned(String),

    #[error("Not enough resources for a {0} action")]
    InsufficientResources(Lane),

    #[error("Time scale must be an integer between 1 and 10, got {0}")]
    InvalidTimeScale(i64),

    #[error("No save available")]
    NoSaveAvailable,
}

pub type CommandResult = std::result::Result<String, CommandError>;
