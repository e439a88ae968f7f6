//! Terminal swatches drawn with 24-bit ANSI background colors.
//!
//! With color disabled a swatch degrades to its bracketed hex code so the
//! output stays readable in logs and pipes.

use value_trainer_core::{hex_decode, Rgb};

/// Swatch width in terminal columns.
pub const SWATCH_WIDTH: usize = 24;

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// One row of solid color.
    pub fn block(&self, rgb: Rgb, width: usize) -> String {
        if self.color {
            format!(
                "\x1b[48;2;{};{};{}m{}\x1b[0m",
                rgb.r,
                rgb.g,
                rgb.b,
                " ".repeat(width)
            )
        } else {
            format!("[{rgb}]")
        }
    }

    /// A swatch `rows` tall for a `#rrggbb` string. Unparsable hex draws black.
    pub fn swatch(&self, hex: &str, rows: usize) -> Vec<String> {
        let rgb = hex_decode(hex).unwrap_or(Rgb::gray(0));
        if !self.color {
            return vec![self.block(rgb, SWATCH_WIDTH)];
        }
        (0..rows).map(|_| self.block(rgb, SWATCH_WIDTH)).collect()
    }

    /// Top half `top`, bottom half `bottom`, like the reveal view of the game.
    pub fn split(&self, top: &str, bottom: &str, rows: usize) -> Vec<String> {
        let half = rows.div_ceil(2).max(1);
        let mut lines = self.swatch(top, half);
        lines.extend(self.swatch(bottom, half));
        lines
    }
}
