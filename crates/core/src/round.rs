//! One round of the game: a hidden target color and a single guess.

use crate::bins::{gray_hex_for_bin, Bin};
use crate::error::TrainerError;
use crate::generator::{ColorSample, Generator};
use crate::prng::Xorshift64;
use serde::Serialize;

/// Outcome of a revealed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub guessed: Bin,
    pub actual: Bin,
    /// `|guessed - actual|`.
    pub offset: u8,
    /// Anchor gray of the guessed bin, shown above the actual gray on reveal.
    pub guessed_gray_hex: String,
    /// Luminance-matched gray of the target color.
    pub actual_gray_hex: String,
}

impl RoundResult {
    pub fn new(guessed: Bin, sample: &ColorSample) -> Self {
        Self {
            guessed,
            actual: sample.bin(),
            offset: guessed.distance(sample.bin()),
            guessed_gray_hex: gray_hex_for_bin(guessed),
            actual_gray_hex: sample.gray_hex().to_string(),
        }
    }

    pub fn is_exact(&self) -> bool {
        self.offset == 0
    }
}

/// A round in progress. Owns its sample until the next round replaces it.
#[derive(Debug, Clone)]
pub struct Round {
    sample: ColorSample,
    result: Option<RoundResult>,
}

impl Round {
    /// Starts a round with a uniformly random target bin.
    pub fn start(generator: &Generator, rng: &mut Xorshift64) -> Self {
        let target = Bin::random(rng);
        Self::with_target(generator, target, rng)
    }

    /// Starts a round aiming for a specific bin.
    pub fn with_target(generator: &Generator, target: Bin, rng: &mut Xorshift64) -> Self {
        let sample = generator.generate(target, rng);
        tracing::debug!(target_bin = %target, bin = %sample.bin(), hex = sample.hex(), "round started");
        Self {
            sample,
            result: None,
        }
    }

    pub fn sample(&self) -> &ColorSample {
        &self.sample
    }

    pub fn is_revealed(&self) -> bool {
        self.result.is_some()
    }

    /// The result, once revealed.
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Scores `guess` against the sample. Only the first guess counts.
    ///
    /// Returns `TrainerError::AlreadyRevealed` on a second call.
    pub fn reveal(&mut self, guess: Bin) -> Result<RoundResult, TrainerError> {
        if self.result.is_some() {
            return Err(TrainerError::AlreadyRevealed);
        }
        let result = RoundResult::new(guess, &self.sample);
        self.result = Some(result.clone());
        Ok(result)
    }
}
