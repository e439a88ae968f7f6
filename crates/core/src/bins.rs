//! The ten value bins and the mapping between bins and luminance.
//!
//! Bin 1 is the lightest (white, luminance 1) and bin 10 the darkest (black,
//! luminance 0). A luminance maps to `1 + round((1 - L) * 9)`, so each interior
//! bin covers a window of 1/9 centered on its anchor luminance and the two end
//! bins cover half a window each.

use crate::color::{clamp01, gray_hex_from_luminance};
use crate::error::TrainerError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A value bin in 1..=10. Ordered from lightest to darkest.
///
/// Serializes as a bare integer; deserialization rejects out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Bin(u8);

impl Bin {
    /// Number of bins on the scale.
    pub const COUNT: u8 = 10;
    pub const LIGHTEST: Bin = Bin(1);
    pub const DARKEST: Bin = Bin(Self::COUNT);
    /// Mid-scale bin, the guess a player starts from.
    pub const MIDDLE: Bin = Bin(5);

    /// Checked constructor.
    ///
    /// Returns `TrainerError::InvalidBin` outside 1..=10.
    pub fn new(value: i64) -> Result<Self, TrainerError> {
        if (1..=Self::COUNT as i64).contains(&value) {
            Ok(Bin(value as u8))
        } else {
            Err(TrainerError::InvalidBin(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// All bins from lightest to darkest.
    pub fn all() -> impl Iterator<Item = Bin> {
        (1..=Self::COUNT).map(Bin)
    }

    /// A uniformly random bin.
    pub fn random(rng: &mut Xorshift64) -> Bin {
        Bin(rng.next_inclusive(1, Self::COUNT as u64) as u8)
    }

    /// Absolute difference between two bins, the "off by" score of a guess.
    pub fn distance(self, other: Bin) -> u8 {
        self.0.abs_diff(other.0)
    }

    /// See [`bin_anchor_luminance`].
    pub fn anchor_luminance(self) -> f64 {
        bin_anchor_luminance(self)
    }
}

impl TryFrom<i64> for Bin {
    type Error = TrainerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Bin::new(value)
    }
}

impl From<Bin> for u8 {
    fn from(bin: Bin) -> u8 {
        bin.0
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Bin {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| TrainerError::UnparsableBin(trimmed.to_string()))?;
        Bin::new(value)
    }
}

/// Maps a relative luminance to its value bin.
///
/// The luminance is clamped to [0, 1] first (NaN counts as 0, i.e. black).
/// Ties round half away from zero.
pub fn luminance_to_bin(luminance: f64) -> Bin {
    let darkness = 1.0 - clamp01(luminance);
    let raw = 1.0 + (darkness * 9.0).round();
    Bin(raw.clamp(1.0, Bin::COUNT as f64) as u8)
}

/// The canonical luminance of a bin: `1 - (bin - 1) / 9`.
pub fn bin_anchor_luminance(bin: Bin) -> f64 {
    1.0 - (bin.0 - 1) as f64 / 9.0
}

/// Gray swatch for a bin number alone, built from its anchor luminance.
pub fn gray_hex_for_bin(bin: Bin) -> String {
    gray_hex_from_luminance(bin_anchor_luminance(bin))
}
