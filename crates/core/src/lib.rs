#![deny(unsafe_code)]
//! Core of the value trainer, a color-perception game.
//!
//! A round shows a random color; the player guesses its value (perceived
//! lightness) on a 1–10 scale. This crate provides the colorimetry
//! (`relative_luminance`, `hsl_to_rgb`, luminance-matched grays), the value
//! `Bin` mapping, the constrained `Generator` that produces a color for a
//! requested bin, and the `Round` / `StatsRecord` / `StatsStore` state the
//! front ends drive. All randomness flows through an explicit `Xorshift64`.

pub mod bins;
pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod prng;
pub mod round;
pub mod stats;
pub mod store;

pub use bins::{bin_anchor_luminance, gray_hex_for_bin, luminance_to_bin, Bin};
pub use color::{
    gray_hex_from_luminance, hex_decode, hex_encode, hsl_to_rgb, linear_to_srgb_channel,
    relative_luminance, srgb_channel_to_linear, Rgb,
};
pub use config::GeneratorConfig;
pub use error::TrainerError;
pub use generator::{fallback, generate_color_for_bin, ColorSample, Generator};
pub use prng::Xorshift64;
pub use round::{Round, RoundResult};
pub use stats::StatsRecord;
pub use store::{StatsStore, STATS_KEY};
