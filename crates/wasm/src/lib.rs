#![deny(unsafe_code)]
//! Browser bindings for the value trainer.
//!
//! The page owns the DOM and local storage; this crate owns color generation
//! and scoring. A typical loop: `new Trainer(seed)`, paint `hex()`, call
//! `reveal(guess)`, paint `guessedGrayHex()` over `grayHex()`, then
//! `newRound()`.

use value_trainer_core::{
    gray_hex_for_bin, luminance_to_bin, Bin, Generator, GeneratorConfig, Round, RoundResult,
    TrainerError, Xorshift64,
};
use wasm_bindgen::prelude::*;

/// A single-player game session.
#[wasm_bindgen]
pub struct Trainer {
    generator: Generator,
    rng: Xorshift64,
    round: Round,
}

impl Trainer {
    fn with_generator(seed: u64, generator: Generator) -> Self {
        let mut rng = Xorshift64::new(seed);
        let round = Round::start(&generator, &mut rng);
        Self {
            generator,
            rng,
            round,
        }
    }

    fn try_with_params(seed: u64, params: &str) -> Result<Self, TrainerError> {
        let params: serde_json::Value = serde_json::from_str(params)?;
        let generator = Generator::new(GeneratorConfig::from_json(&params))?;
        Ok(Self::with_generator(seed, generator))
    }

    fn try_reveal(&mut self, guess: i64) -> Result<RoundResult, TrainerError> {
        let guess = Bin::new(guess)?;
        self.round.reveal(guess)
    }
}

#[wasm_bindgen]
impl Trainer {
    /// Starts a session with default generator settings and deals the first round.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Trainer {
        Self::with_generator(seed, Generator::default())
    }

    /// Like the constructor, with generator settings as a JSON object string.
    #[wasm_bindgen(js_name = withParams)]
    pub fn with_params(seed: u64, params: &str) -> Result<Trainer, JsError> {
        Ok(Self::try_with_params(seed, params)?)
    }

    /// Discards the current round and deals a new one.
    #[wasm_bindgen(js_name = newRound)]
    pub fn new_round(&mut self) {
        self.round = Round::start(&self.generator, &mut self.rng);
    }

    /// The color to show, as `#rrggbb`.
    pub fn hex(&self) -> String {
        self.round.sample().hex().to_string()
    }

    /// Gray with the same luminance as the current color.
    #[wasm_bindgen(js_name = grayHex)]
    pub fn gray_hex(&self) -> String {
        self.round.sample().gray_hex().to_string()
    }

    #[wasm_bindgen(js_name = isRevealed)]
    pub fn is_revealed(&self) -> bool {
        self.round.is_revealed()
    }

    /// Scores a guess in 1..=10 and returns the offset. Throws on a bad bin or
    /// when the round was already revealed.
    pub fn reveal(&mut self, guess: i32) -> Result<u8, JsError> {
        Ok(self.try_reveal(guess.into())?.offset)
    }

    /// The actual bin, once revealed.
    #[wasm_bindgen(js_name = actualBin)]
    pub fn actual_bin(&self) -> Option<u8> {
        self.round.result().map(|r| r.actual.get())
    }

    /// Anchor gray of the guessed bin, once revealed.
    #[wasm_bindgen(js_name = guessedGrayHex)]
    pub fn guessed_gray_hex(&self) -> Option<String> {
        self.round.result().map(|r| r.guessed_gray_hex.clone())
    }

    /// The full round result as JSON, once revealed.
    #[wasm_bindgen(js_name = resultJson)]
    pub fn result_json(&self) -> Option<String> {
        self.round
            .result()
            .and_then(|r| serde_json::to_string(r).ok())
    }
}

/// Anchor gray hex of a bin in 1..=10.
#[wasm_bindgen(js_name = grayHexForBin)]
pub fn gray_hex_for_bin_js(bin: i32) -> Result<String, JsError> {
    Ok(gray_hex_for_bin(Bin::new(bin.into())?))
}

/// Value bin of a relative luminance. Out-of-range input is clamped.
#[wasm_bindgen(js_name = luminanceToBin)]
pub fn luminance_to_bin_js(luminance: f64) -> u8 {
    luminance_to_bin(luminance).get()
}
