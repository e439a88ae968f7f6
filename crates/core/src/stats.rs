//! Running accuracy counters across rounds.

use crate::round::RoundResult;
use serde::{Deserialize, Serialize};

/// Persisted accuracy record.
///
/// Stored as `{"roundsPlayed": n, "cumulativeOffset": n, "lastOffset": n | null}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub rounds_played: u64,
    pub cumulative_offset: u64,
    pub last_offset: Option<u8>,
}

impl StatsRecord {
    /// Folds one revealed round into the record.
    pub fn record(&mut self, result: &RoundResult) {
        self.rounds_played = self.rounds_played.saturating_add(1);
        self.cumulative_offset = self.cumulative_offset.saturating_add(result.offset as u64);
        self.last_offset = Some(result.offset);
    }

    /// Back to zero rounds and no last offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mean offset per round rounded to one decimal, `None` before the first round.
    pub fn average_offset(&self) -> Option<f64> {
        if self.rounds_played == 0 {
            return None;
        }
        let mean = self.cumulative_offset as f64 / self.rounds_played as f64;
        Some((mean * 10.0).round() / 10.0)
    }
}
