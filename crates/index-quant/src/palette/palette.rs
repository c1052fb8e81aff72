//! Palette struct and nearest-color matching.
//!
//! This module provides the realized [`Palette`] a frame is quantized
//! against, together with the [`DistanceMetric`] used by the nearest-index
//! resolver.

use std::str::FromStr;

use crate::color::{Residual, Rgba};
use crate::error::QuantizeError;

/// Largest palette the quantizer supports. Indices are emitted as `u8`.
pub const MAX_PALETTE_COLORS: usize = 256;

/// Distance metric for palette color matching.
///
/// Both variants are plain sums of squared per-channel differences, chosen
/// over perceptual metrics so results are fast and reproducible bit for bit
/// across platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Squared Euclidean distance over R, G, B and A, equally weighted.
    #[default]
    Rgba,

    /// Squared Euclidean distance over R, G and B; alpha is ignored.
    ///
    /// Useful when the output format cannot represent transparency or the
    /// caller composites before quantizing.
    Rgb,
}

impl DistanceMetric {
    /// Squared distance between two colors under this metric.
    #[inline]
    pub fn distance(self, a: Rgba, b: Rgba) -> f32 {
        let dr = a.r - b.r;
        let dg = a.g - b.g;
        let db = a.b - b.b;
        let rgb = dr * dr + dg * dg + db * db;
        match self {
            DistanceMetric::Rgba => {
                let da = a.a - b.a;
                rgb + da * da
            }
            DistanceMetric::Rgb => rgb,
        }
    }
}

/// An ordered, non-empty set of colors that pixels are mapped onto.
///
/// Index identity matters: two palettes with the same colors in a different
/// order produce different index buffers. Duplicate colors are permitted;
/// the lowest index wins when distances tie.
///
/// # Example
///
/// ```
/// use index_quant::{Palette, Rgba};
///
/// let palette = Palette::new(&[Rgba::BLACK, Rgba::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
///
/// let (idx, residual) = palette.find_nearest(Rgba::from_rgb_u8(200, 200, 200));
/// assert_eq!(idx, 1);
/// assert!(residual[0] < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba>,
    metric: DistanceMetric,
}

impl Palette {
    /// Create a palette from colors, using the default RGBA metric.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::EmptyPalette`] if `colors` is empty
    /// - [`QuantizeError::PaletteTooLarge`] if there are more than
    ///   [`MAX_PALETTE_COLORS`] entries
    pub fn new(colors: &[Rgba]) -> Result<Self, QuantizeError> {
        if colors.is_empty() {
            return Err(QuantizeError::EmptyPalette);
        }
        if colors.len() > MAX_PALETTE_COLORS {
            return Err(QuantizeError::PaletteTooLarge {
                len: colors.len(),
                max: MAX_PALETTE_COLORS,
            });
        }
        Ok(Self {
            colors: colors.to_vec(),
            metric: DistanceMetric::default(),
        })
    }

    /// Create a palette from hex color strings such as `"#FF0000"` or `"#F008"`.
    ///
    /// # Example
    ///
    /// ```
    /// use index_quant::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000", "#FFF", "#F00"]).unwrap();
    /// assert_eq!(palette.len(), 3);
    /// ```
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, QuantizeError> {
        let parsed = colors
            .iter()
            .map(|s| Rgba::from_str(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&parsed)
    }

    /// Override the distance metric used for matching.
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// The 216-color web-safe palette (every combination of
    /// `00, 33, 66, 99, CC, FF` per channel), red varying slowest.
    pub fn web_safe() -> Self {
        const STEPS: [u8; 6] = [0x00, 0x33, 0x66, 0x99, 0xCC, 0xFF];
        let mut colors = Vec::with_capacity(216);
        for r in STEPS {
            for g in STEPS {
                for b in STEPS {
                    colors.push(Rgba::from_rgb_u8(r, g, b));
                }
            }
        }
        Self {
            colors,
            metric: DistanceMetric::default(),
        }
    }

    /// An evenly spaced grey ramp from black to white with `levels` entries.
    ///
    /// # Errors
    ///
    /// Fails with [`QuantizeError::InvalidMaxColors`] unless
    /// `2 <= levels <= MAX_PALETTE_COLORS`.
    pub fn grey_ramp(levels: usize) -> Result<Self, QuantizeError> {
        if !(2..=MAX_PALETTE_COLORS).contains(&levels) {
            return Err(QuantizeError::InvalidMaxColors {
                got: levels,
                max: MAX_PALETTE_COLORS,
            });
        }
        let max_level = (levels - 1) as u32;
        let colors: Vec<Rgba> = (0..levels as u32)
            .map(|i| {
                let v = ((i * 255 + max_level / 2) / max_level) as u8;
                Rgba::from_rgb_u8(v, v, v)
            })
            .collect();
        Self::new(&colors)
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgba {
        self.colors[idx]
    }

    /// All colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// The metric used by [`find_nearest()`](Self::find_nearest).
    #[inline]
    pub fn distance_metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Distance between two colors under this palette's metric.
    #[inline]
    pub fn distance(&self, a: Rgba, b: Rgba) -> f32 {
        self.metric.distance(a, b)
    }

    /// Index of the palette entry closest to `color`.
    ///
    /// Linear scan with a strict `<` comparison, so the first entry wins
    /// when several are equally close.
    #[inline]
    pub fn find_nearest_index(&self, color: Rgba) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;

        for (i, &entry) in self.colors.iter().enumerate() {
            let dist = self.metric.distance(color, entry);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
                if dist == 0.0 {
                    break;
                }
            }
        }

        best_idx
    }

    /// Find the nearest palette entry and the residual error.
    ///
    /// Returns `(index, residual)` where `residual = color - palette[index]`
    /// per channel. The residual always covers all four channels, even when
    /// the metric ignores alpha.
    #[inline]
    pub fn find_nearest(&self, color: Rgba) -> (usize, Residual) {
        let idx = self.find_nearest_index(color);
        (idx, color.residual(self.colors[idx]))
    }
}
