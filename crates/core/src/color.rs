//! Colorimetry for the value trainer.
//!
//! 8-bit sRGB channels, their linear-light counterparts, Rec.709 relative
//! luminance, HSL to RGB conversion and hex encoding. Everything here is a
//! pure function over `f64`; inputs outside their documented domain are
//! clamped rather than rejected, so none of these can fail except hex parsing.
//!
//! Relative luminance is the lightness signal used by the rest of the crate.
//! It is computed from linearized channels, not from an average of the raw
//! 8-bit values, so a saturated blue reads much darker than a yellow of the
//! same HSL lightness.

use crate::error::TrainerError;
use std::fmt;

/// Rec.709 / sRGB luminance weights for red, green and blue.
const LUMA_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// An 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral color with all three channels equal to `v`.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// `"#rrggbb"` in lowercase.
    pub fn hex(self) -> String {
        hex_encode(self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1].
    pub fn luminance(self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }

    pub fn is_neutral(self) -> bool {
        self.r == self.g && self.g == self.b
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Clamps to [0, 1], mapping NaN to 0.
pub(crate) fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Scales a unit-range value to a byte, rounding half away from zero.
fn unit_to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Linearizes one gamma-encoded sRGB channel.
pub fn srgb_channel_to_linear(u: u8) -> f64 {
    let c = u as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Gamma-encodes a linear value into an sRGB byte.
///
/// `x` is clamped to [0, 1] before encoding.
pub fn linear_to_srgb_channel(x: f64) -> u8 {
    let x = clamp01(x);
    let encoded = if x <= 0.0031308 {
        12.92 * x
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    };
    unit_to_byte(encoded)
}

/// Relative luminance of an 8-bit sRGB color, in [0, 1].
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let [wr, wg, wb] = LUMA_WEIGHTS;
    let l = wr * srgb_channel_to_linear(r)
        + wg * srgb_channel_to_linear(g)
        + wb * srgb_channel_to_linear(b);
    // The weights sum to 1 only up to float rounding.
    l.clamp(0.0, 1.0)
}

/// Converts HSL to 8-bit RGB.
///
/// `hue` is in degrees and taken modulo 360 (NaN is treated as 0);
/// `saturation` and `lightness` are clamped to [0, 1].
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    let h = if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    };
    let s = clamp01(saturation);
    let l = clamp01(lightness);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb {
        r: unit_to_byte(r + m),
        g: unit_to_byte(g + m),
        b: unit_to_byte(b + m),
    }
}

/// Encodes three channels as `"#rrggbb"` (lowercase, zero-padded).
pub fn hex_encode(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parses `"#rrggbb"` or `"rrggbb"`, case insensitive.
///
/// Returns `TrainerError::InvalidColor` for anything else.
pub fn hex_decode(hex: &str) -> Result<Rgb, TrainerError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(TrainerError::InvalidColor(format!(
            "expected 6 hex digits, got {hex:?}"
        )));
    }
    let channel = |range: std::ops::Range<usize>, name: &str| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| TrainerError::InvalidColor(format!("invalid {name} component: {e}")))
    };
    Ok(Rgb {
        r: channel(0..2, "red")?,
        g: channel(2..4, "green")?,
        b: channel(4..6, "blue")?,
    })
}

/// Neutral gray whose relative luminance matches `luminance`.
///
/// The luminance is clamped to [0, 1] and encoded once through
/// [`linear_to_srgb_channel`]; the byte is used for all three channels.
/// Because the weights sum to one, a gray's luminance is just its linear value.
pub fn gray_from_luminance(luminance: f64) -> Rgb {
    Rgb::gray(linear_to_srgb_channel(clamp01(luminance)))
}

/// Hex string of [`gray_from_luminance`].
pub fn gray_hex_from_luminance(luminance: f64) -> String {
    gray_from_luminance(luminance).hex()
}
