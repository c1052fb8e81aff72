//! Ordered (threshold matrix) dithering.
//!
//! Ordered dithering perturbs each pixel by a value taken from a small
//! tiled threshold matrix before the palette lookup. The perturbation only
//! depends on `(x, y)`, so pixels never influence each other and the result
//! is independent of visitation order.
//!
//! | Aspect | Ordered | Error Diffusion |
//! |--------|---------|-----------------|
//! | Pattern | Regular cross-hatch | Organic, scan dependent |
//! | Parallelizable | Yes (per-pixel) | No (neighbor dependencies) |
//! | Best for | Flat graphics, animation | Photos, gradients |

use crate::color::Rgba;

/// Classic 3x3 ordered dither matrix.
const ORDERED_3X3: [u32; 9] = [0, 5, 2, 7, 4, 8, 3, 6, 1];

/// Ordered dithering with a normalized threshold matrix.
///
/// Thresholds are stored centered on zero, `(m + 1) / n² - 0.5`, so a
/// perturbation is symmetric around the original color.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedDither {
    size: usize,
    thresholds: Vec<f32>,
}

impl OrderedDither {
    /// Bayer matrix of side 2.
    pub fn bayer2x2() -> Self {
        Self::from_ranks(2, &bayer_matrix(2))
    }

    /// Bayer matrix of side 4.
    pub fn bayer4x4() -> Self {
        Self::from_ranks(4, &bayer_matrix(4))
    }

    /// Bayer matrix of side 8.
    pub fn bayer8x8() -> Self {
        Self::from_ranks(8, &bayer_matrix(8))
    }

    /// Bayer matrix of side 16.
    pub fn bayer16x16() -> Self {
        Self::from_ranks(16, &bayer_matrix(16))
    }

    /// The 3x3 ordered matrix.
    pub fn ordered3x3() -> Self {
        Self::from_ranks(3, &ORDERED_3X3)
    }

    fn from_ranks(size: usize, ranks: &[u32]) -> Self {
        let n2 = (size * size) as f32;
        let thresholds = ranks.iter().map(|&m| (m as f32 + 1.0) / n2 - 0.5).collect();
        Self { size, thresholds }
    }

    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Centered threshold at `(x, y)`, tiled over the image.
    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> f32 {
        self.thresholds[(y % self.size) * self.size + (x % self.size)]
    }

    /// Perturb `color` for pixel `(x, y)`.
    ///
    /// `spread` comes from [`palette_spread`]. Only the color channels move;
    /// alpha passes through.
    #[inline]
    pub fn adjust(&self, color: Rgba, x: usize, y: usize, scale: f32, spread: f32) -> Rgba {
        let factor = spread * self.threshold(x, y) * scale;
        color.offset_clamped([factor, factor, factor, 0.0])
    }
}

/// Typical spacing between palette entries along one channel.
///
/// Assumes the palette is spread evenly over the color cube, so each axis
/// holds about `cbrt(len)` levels. Returned in normalized units.
pub fn palette_spread(palette_len: usize) -> f32 {
    let levels = (palette_len as f32).cbrt() - 1.0;
    (255.0 / levels.max(1.0)).trunc() / 255.0
}

/// Recursive Bayer construction: `M(2n) = [[4M, 4M+2], [4M+3, 4M+1]]`.
fn bayer_matrix(size: usize) -> Vec<u32> {
    const BASE: [u32; 4] = [0, 2, 3, 1];
    if size <= 2 {
        return BASE.to_vec();
    }
    let half = size / 2;
    let inner = bayer_matrix(half);
    let mut out = vec![0u32; size * size];
    for by in 0..2 {
        for bx in 0..2 {
            let offset = BASE[by * 2 + bx];
            for y in 0..half {
                for x in 0..half {
                    out[(by * half + y) * size + bx * half + x] = 4 * inner[y * half + x] + offset;
                }
            }
        }
    }
    out
}
