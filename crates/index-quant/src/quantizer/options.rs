//! Quantizer configuration.

use crate::dither::{Dither, ErrorDiffusion};
use crate::error::QuantizeError;
use crate::palette::{DistanceMetric, TruncationPolicy, MAX_PALETTE_COLORS};

/// Configuration shared by a quantizer and the frame quantizers it spawns.
///
/// # Defaults
///
/// - `max_colors`: 256
/// - `dither`: Floyd-Steinberg error diffusion
/// - `dither_scale`: 1.0 (full strength)
/// - `metric`: [`DistanceMetric::Rgba`]
/// - `truncation`: [`TruncationPolicy::Truncate`]
///
/// Values are checked by [`validate`](Self::validate), which every
/// constructor that accepts options calls.
///
/// # Example
///
/// ```
/// use index_quant::{Dither, QuantizerOptions};
///
/// let options = QuantizerOptions::new()
///     .max_colors(16)
///     .dither(Dither::from_name("bayer4").unwrap())
///     .dither_scale(0.5);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizerOptions {
    /// Upper bound on the realized palette size, `1..=256`.
    pub max_colors: usize,

    /// Dithering strategy.
    pub dither: Dither,

    /// Dithering strength in `0.0..=1.0`. `0.0` disables the effect.
    pub dither_scale: f32,

    /// Distance used by the nearest-entry search.
    pub metric: DistanceMetric,

    /// Behavior when the source has more than `max_colors` entries.
    pub truncation: TruncationPolicy,
}

impl Default for QuantizerOptions {
    fn default() -> Self {
        Self {
            max_colors: MAX_PALETTE_COLORS,
            dither: Dither::ErrorDiffusion(ErrorDiffusion::floyd_steinberg()),
            dither_scale: 1.0,
            metric: DistanceMetric::default(),
            truncation: TruncationPolicy::default(),
        }
    }
}

impl QuantizerOptions {
    /// Options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the palette size cap.
    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    /// Set the dithering strategy.
    #[inline]
    pub fn dither(mut self, dither: Dither) -> Self {
        self.dither = dither;
        self
    }

    /// Set the dithering strength.
    #[inline]
    pub fn dither_scale(mut self, scale: f32) -> Self {
        self.dither_scale = scale;
        self
    }

    /// Set the distance metric.
    #[inline]
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the truncation policy.
    #[inline]
    pub fn truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), QuantizeError> {
        if self.max_colors == 0 || self.max_colors > MAX_PALETTE_COLORS {
            return Err(QuantizeError::InvalidMaxColors {
                got: self.max_colors,
                max: MAX_PALETTE_COLORS,
            });
        }
        if !(0.0..=1.0).contains(&self.dither_scale) {
            return Err(QuantizeError::InvalidDitherScale(self.dither_scale));
        }
        Ok(())
    }
}
