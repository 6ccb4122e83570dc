//! Three-anchor false-color ramp
//!
//! A temperature is normalized to `t = clamp((T - ambient) / (max - ambient), 0, 1)`.
//! `[0, 0.5)` blends cold → mid and `[0.5, 1]` blends mid → hot. Temperatures below
//! ambient render as the cold anchor.

use crate::error::SimError;
use crate::solver::lerp;
use serde::{Deserialize, Serialize};

/// Bytes written per cell by [`render_rgba`]
pub const BYTES_PER_PIXEL: usize = 4;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise blend, rounded to the nearest integer
    fn blend(self, other: Self, t: f32) -> Self {
        let channel = |a: u8, b: u8| {
            lerp(f32::from(a), f32::from(b), t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

/// Anchor colors for ambient, halfway and maximum temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorRamp {
    pub cold: Rgb,
    pub mid: Rgb,
    pub hot: Rgb,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            cold: Rgb::new(30, 90, 220),
            mid: Rgb::new(130, 110, 220),
            hot: Rgb::new(255, 130, 210),
        }
    }
}

impl ColorRamp {
    /// Map one temperature to a color
    ///
    /// `max_temp` must exceed `ambient`.
    #[must_use]
    pub fn colorize(&self, temp: f32, ambient: f32, max_temp: f32) -> Rgb {
        let t = ((temp - ambient) / (max_temp - ambient)).clamp(0.0, 1.0);
        if t < 0.5 {
            self.cold.blend(self.mid, t * 2.0)
        } else {
            self.mid.blend(self.hot, (t - 0.5) * 2.0)
        }
    }
}

/// Write one opaque RGBA pixel per temperature sample into `buffer`
///
/// # Errors
///
/// Returns [`SimError::SizeMismatch`] unless `buffer.len() == temperature.len() * 4`.
/// Nothing is written in that case.
pub fn render_rgba(
    ramp: &ColorRamp,
    temperature: &[f32],
    ambient: f32,
    max_temp: f32,
    buffer: &mut [u8],
) -> Result<(), SimError> {
    let expected = temperature.len() * BYTES_PER_PIXEL;
    if buffer.len() != expected {
        return Err(SimError::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }

    for (&temp, pixel) in temperature
        .iter()
        .zip(buffer.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let color = ramp.colorize(temp, ambient, max_temp);
        pixel[0] = color.r;
        pixel[1] = color.g;
        pixel[2] = color.b;
        pixel[3] = u8::MAX;
    }
    Ok(())
}
