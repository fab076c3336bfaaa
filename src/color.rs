//! Highlight color classification
//!
//! Native annotations report color as a raw sample of up to four float
//! channels. The host works with a fixed four-color palette, so samples
//! are classified with ordered heuristics biased toward yellow as the
//! safe default, and exported back through a fixed inverse table.

use serde::{Deserialize, Serialize};

/// Raw color sample reported by the document engine.
///
/// `n` is the number of channels actually populated: 1 (grayscale),
/// 3 (RGB) or 4 (CMYK). Channel values are in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorSample {
    pub n: usize,
    pub components: [f32; 4],
}

impl ColorSample {
    /// Three-channel RGB sample.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self {
            n: 3,
            components: [r, g, b, 0.0],
        }
    }

    /// Single-channel grayscale sample.
    pub fn gray(value: f32) -> Self {
        Self {
            n: 1,
            components: [value, 0.0, 0.0, 0.0],
        }
    }
}

/// Semantic highlight palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Green,
    Blue,
    Red,
}

impl HighlightColor {
    /// Classify a raw sample into the palette.
    ///
    /// Rules are evaluated in order; any sample no rule claims falls back
    /// to yellow. Samples with fewer than three channels carry no hue
    /// information and default to yellow.
    pub fn classify(sample: &ColorSample) -> Self {
        if sample.n < 3 {
            return Self::Yellow;
        }

        let [r, g, b, _] = sample.components;

        if r > 0.7 && g > 0.7 && b < 0.5 {
            Self::Yellow
        } else if g > 0.6 && g > r && g > b {
            Self::Green
        } else if b > 0.5 && b > r {
            Self::Blue
        } else if r > 0.6 && r > g && r > b {
            Self::Red
        } else {
            Self::Yellow
        }
    }

    /// Canonical RGB triple used when writing the color back out.
    pub fn to_rgb(self) -> [f32; 3] {
        match self {
            Self::Yellow => [1.0, 1.0, 0.0],
            Self::Green => [0.0, 1.0, 0.0],
            Self::Blue => [0.0, 0.5, 1.0],
            Self::Red => [1.0, 0.0, 0.0],
        }
    }
}
