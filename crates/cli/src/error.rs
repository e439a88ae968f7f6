//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (round bookkeeping)
//! - 11: I/O error (terminal, stats file)
//! - 12: input error (bad hex, bad bin, bad `--params`)
//! - 13: serialization error

use std::fmt;
use value_trainer_core::TrainerError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A core error that is not about I/O or user input.
    Core(TrainerError),
    /// Reading the terminal or writing the stats file failed.
    Io(String),
    /// A user input error.
    Input(String),
    /// JSON encoding or decoding failed.
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CliError({}): {self}", self.exit_code())
    }
}

impl From<TrainerError> for CliError {
    fn from(e: TrainerError) -> Self {
        match e {
            TrainerError::Io(msg) => CliError::Io(msg),
            TrainerError::Serialization(msg) => CliError::Serialization(msg),
            TrainerError::InvalidBin(_)
            | TrainerError::UnparsableBin(_)
            | TrainerError::InvalidColor(_)
            | TrainerError::InvalidConfig(_) => CliError::Input(e.to_string()),
            other => CliError::Core(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
