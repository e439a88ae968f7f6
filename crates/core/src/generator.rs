//! Constrained color generation: a random color whose value bin is known.
//!
//! Generation is bounded rejection sampling over an HSL prior, followed by a
//! deterministic neutral-gray fallback if the budget runs out:
//!
//! ```text
//! attempt_sample(target, budget) or else fallback(target)
//! ```
//!
//! Interior bins each cover roughly a tenth of the luminance range, so a match
//! typically takes a handful of draws. Only the two end bins, whose windows
//! are half as wide, come anywhere near needing the fallback.

use crate::bins::{bin_anchor_luminance, luminance_to_bin, Bin};
use crate::color::{gray_from_luminance, gray_hex_from_luminance, hsl_to_rgb, Rgb};
use crate::config::GeneratorConfig;
use crate::error::TrainerError;
use crate::prng::Xorshift64;
use serde::Serialize;

/// A generated (or analyzed) color together with its value bin.
///
/// Immutable: every field is derived from the RGB triple at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSample {
    red: u8,
    green: u8,
    blue: u8,
    hex: String,
    luminance: f64,
    bin: Bin,
    gray_hex: String,
}

impl ColorSample {
    /// Derives hex, luminance, bin and matching gray from an RGB color.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let luminance = rgb.luminance();
        Self {
            red: rgb.r,
            green: rgb.g,
            blue: rgb.b,
            hex: rgb.hex(),
            luminance,
            bin: luminance_to_bin(luminance),
            gray_hex: gray_hex_from_luminance(luminance),
        }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.red, self.green, self.blue)
    }

    /// `"#rrggbb"` of the color itself.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Relative luminance in [0, 1].
    pub fn luminance(&self) -> f64 {
        self.luminance
    }

    pub fn bin(&self) -> Bin {
        self.bin
    }

    /// Neutral gray with the same luminance as the color.
    pub fn gray_hex(&self) -> &str {
        &self.gray_hex
    }
}

/// Draws colors for a requested bin.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Returns `TrainerError::InvalidConfig` if the saturation range is invalid.
    pub fn new(config: GeneratorConfig) -> Result<Self, TrainerError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Up to `budget` HSL draws; the first whose bin equals `target` wins.
    ///
    /// Each draw consumes three values from `rng`: hue in [0, 360), saturation
    /// in the configured range, lightness in [0, 1).
    pub fn attempt_sample(
        &self,
        target: Bin,
        budget: usize,
        rng: &mut Xorshift64,
    ) -> Option<ColorSample> {
        (0..budget).find_map(|attempt| {
            let hue = rng.next_range(0.0, 360.0);
            let saturation =
                rng.next_range(self.config.min_saturation, self.config.max_saturation);
            let lightness = rng.next_f64();

            let rgb = hsl_to_rgb(hue, saturation, lightness);
            if luminance_to_bin(rgb.luminance()) != target {
                return None;
            }
            tracing::trace!(target_bin = %target, attempts = attempt + 1, hex = %rgb, "sampled color");
            Some(ColorSample::from_rgb(rgb))
        })
    }

    /// A color for `target`, never failing.
    ///
    /// The returned bin equals `target` whenever sampling succeeds. On the
    /// fallback path it is whatever bin the fallback gray actually falls in.
    pub fn generate(&self, target: Bin, rng: &mut Xorshift64) -> ColorSample {
        self.attempt_sample(target, self.config.attempt_budget, rng)
            .unwrap_or_else(|| {
                tracing::debug!(
                    target_bin = %target,
                    budget = self.config.attempt_budget,
                    "no sampled color landed in bin, using gray fallback"
                );
                fallback(target)
            })
    }
}

/// Neutral gray at the bin's anchor luminance.
///
/// Luminance and bin are recomputed from the quantized gray, so the sample is
/// self-consistent even if quantization were to push it across a bin edge.
pub fn fallback(target: Bin) -> ColorSample {
    ColorSample::from_rgb(gray_from_luminance(bin_anchor_luminance(target)))
}

/// Generates with the default [`GeneratorConfig`].
pub fn generate_color_for_bin(target: Bin, rng: &mut Xorshift64) -> ColorSample {
    Generator::default().generate(target, rng)
}
