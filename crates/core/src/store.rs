//! File-backed key-value storage for the stats record.
//!
//! The file is a flat JSON object of string keys, the same shape the browser
//! game keeps in local storage. The record lives under [`STATS_KEY`]; other
//! keys are preserved on save.
//!
//! Loading never fails: a missing, unreadable or malformed file yields the
//! default record, as a fresh player would see.

use crate::error::TrainerError;
use crate::stats::StatsRecord;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Storage key of the stats record.
pub const STATS_KEY: &str = "valueGuessStats_v4";

/// Stats persisted in a JSON key-value file.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
}

impl StatsStore {
    /// Points the store at `path`. Nothing is read or created until used.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record, falling back to defaults on any problem.
    pub fn load(&self) -> StatsRecord {
        let bytes = match self.read_bytes() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return StatsRecord::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable stats file");
                return StatsRecord::default();
            }
        };
        let entries = match parse_entries(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed stats file");
                return StatsRecord::default();
            }
        };
        let Some(value) = entries.get(STATS_KEY) else {
            return StatsRecord::default();
        };
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed stats record");
            StatsRecord::default()
        })
    }

    /// Writes the record under [`STATS_KEY`], keeping any other keys.
    ///
    /// A file that exists but cannot be read is left alone and the read error
    /// returned. A file that is not a JSON object is replaced. The new content
    /// goes to a temporary file in the same directory which is then renamed
    /// over the old one, so an interrupted save never leaves a truncated file.
    pub fn save(&self, record: &StatsRecord) -> Result<(), TrainerError> {
        let mut entries = match self.read_bytes()? {
            Some(bytes) => parse_entries(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "replacing malformed stats file");
                Map::new()
            }),
            None => Map::new(),
        };
        entries.insert(STATS_KEY.to_string(), serde_json::to_value(record)?);
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), rounds = record.rounds_played, "saved stats");
        Ok(())
    }

    /// Saves and returns an all-zero record.
    pub fn reset(&self) -> Result<StatsRecord, TrainerError> {
        let record = StatsRecord::default();
        self.save(&record)?;
        Ok(record)
    }

    /// `Ok(None)` when the file does not exist yet.
    fn read_bytes(&self) -> Result<Option<Vec<u8>>, TrainerError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_entries(bytes: &[u8]) -> Result<Map<String, Value>, TrainerError> {
    match serde_json::from_slice(bytes)? {
        Value::Object(entries) => Ok(entries),
        other => Err(TrainerError::Serialization(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
