//! Error types for the value trainer core.

use thiserror::Error;

/// Errors produced by core operations.
///
/// The colorimetry and generation functions are total and never return these;
/// they come from checked construction, round bookkeeping and stats storage.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// A value bin outside the inclusive range 1..=10.
    #[error("invalid value bin {0}: expected an integer from 1 to 10")]
    InvalidBin(i64),

    /// Text that should have named a value bin was not an integer.
    #[error("not a value bin: {0:?}")]
    UnparsableBin(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Generator settings were inconsistent.
    #[error("invalid generator config: {0}")]
    InvalidConfig(String),

    /// A guess was submitted for a round that was already revealed.
    #[error("round already revealed; start a new round before guessing again")]
    AlreadyRevealed,

    /// Reading or writing the stats file failed.
    #[error("stats storage error: {0}")]
    Io(String),

    /// The stats record could not be encoded or decoded.
    #[error("stats serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for TrainerError {
    fn from(e: std::io::Error) -> Self {
        TrainerError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for TrainerError {
    fn from(e: serde_json::Error) -> Self {
        TrainerError::Serialization(e.to_string())
    }
}
