//! Dithering strategies.
//!
//! A strategy perturbs each pixel's color before the nearest palette entry
//! is chosen, trading per-pixel accuracy for better average color.
//!
//! # Strategies
//!
//! - [`Dither::None`]: no perturbation; each pixel maps to its nearest entry.
//! - [`Dither::ErrorDiffusion`]: the residual of each pixel is pushed onto
//!   unvisited neighbors through a [`Kernel`]. Sequential, row-major.
//! - [`Dither::Ordered`]: a tiled threshold matrix offsets each pixel
//!   independently. Order-free and parallelizable.
//!
//! Per-frame state lives in a [`DitherPass`], created with
//! [`Dither::begin`].
//!
//! # Example
//!
//! ```
//! use index_quant::Dither;
//!
//! let dither = Dither::from_name("atkinson").unwrap();
//! assert!(dither.diffuses_error());
//! assert_eq!(dither.name(), "atkinson");
//! ```

mod error_buffer;
mod kernel;
mod ordered;
mod pass;

pub use kernel::*;
pub use ordered::{palette_spread, OrderedDither};
pub use pass::{DitherPass, PassPhase};

use crate::color::Rgba;
use crate::error::QuantizeError;

/// Names accepted by [`Dither::from_name`], in display order.
const NAMES: &[&str] = &[
    "none",
    "floyd-steinberg",
    "atkinson",
    "burkes",
    "jarvis-judice-ninke",
    "sierra",
    "sierra-two-row",
    "sierra-lite",
    "stevenson-arce",
    "stucki",
    "bayer2",
    "bayer4",
    "bayer8",
    "bayer16",
    "ordered3",
];

/// Error diffusion with a particular kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorDiffusion {
    kernel: Kernel,
}

impl ErrorDiffusion {
    /// Diffuse with a custom kernel.
    ///
    /// Every tap must point at a pixel that comes later in row-major order
    /// (`dy > 0`, or `dy == 0` and `dx > 0`).
    pub const fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    /// Floyd-Steinberg.
    pub const fn floyd_steinberg() -> Self {
        Self::new(FLOYD_STEINBERG)
    }

    /// Atkinson.
    pub const fn atkinson() -> Self {
        Self::new(ATKINSON)
    }

    /// Burkes.
    pub const fn burkes() -> Self {
        Self::new(BURKES)
    }

    /// Jarvis-Judice-Ninke.
    pub const fn jarvis_judice_ninke() -> Self {
        Self::new(JARVIS_JUDICE_NINKE)
    }

    /// Sierra.
    pub const fn sierra() -> Self {
        Self::new(SIERRA)
    }

    /// Sierra Two-Row.
    pub const fn sierra_two_row() -> Self {
        Self::new(SIERRA_TWO_ROW)
    }

    /// Sierra Lite.
    pub const fn sierra_lite() -> Self {
        Self::new(SIERRA_LITE)
    }

    /// Stevenson-Arce.
    pub const fn stevenson_arce() -> Self {
        Self::new(STEVENSON_ARCE)
    }

    /// Stucki.
    pub const fn stucki() -> Self {
        Self::new(STUCKI)
    }

    /// The diffusion kernel.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

/// Dithering strategy selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dither {
    /// Map each pixel to its nearest palette entry.
    #[default]
    None,

    /// Push each pixel's residual onto unvisited neighbors.
    ErrorDiffusion(ErrorDiffusion),

    /// Offset each pixel by a tiled threshold matrix.
    Ordered(OrderedDither),
}

impl Dither {
    /// Look up a strategy by name. See [`Dither::names`].
    pub fn from_name(name: &str) -> Option<Self> {
        let dither = match name.trim().to_ascii_lowercase().as_str() {
            "none" => Dither::None,
            "floyd-steinberg" => Dither::ErrorDiffusion(ErrorDiffusion::floyd_steinberg()),
            "atkinson" => Dither::ErrorDiffusion(ErrorDiffusion::atkinson()),
            "burkes" => Dither::ErrorDiffusion(ErrorDiffusion::burkes()),
            "jarvis-judice-ninke" => Dither::ErrorDiffusion(ErrorDiffusion::jarvis_judice_ninke()),
            "sierra" => Dither::ErrorDiffusion(ErrorDiffusion::sierra()),
            "sierra-two-row" => Dither::ErrorDiffusion(ErrorDiffusion::sierra_two_row()),
            "sierra-lite" => Dither::ErrorDiffusion(ErrorDiffusion::sierra_lite()),
            "stevenson-arce" => Dither::ErrorDiffusion(ErrorDiffusion::stevenson_arce()),
            "stucki" => Dither::ErrorDiffusion(ErrorDiffusion::stucki()),
            "bayer2" => Dither::Ordered(OrderedDither::bayer2x2()),
            "bayer4" => Dither::Ordered(OrderedDither::bayer4x4()),
            "bayer8" => Dither::Ordered(OrderedDither::bayer8x8()),
            "bayer16" => Dither::Ordered(OrderedDither::bayer16x16()),
            "ordered3" => Dither::Ordered(OrderedDither::ordered3x3()),
            _ => return None,
        };
        Some(dither)
    }

    /// All names accepted by [`Dither::from_name`].
    pub fn names() -> &'static [&'static str] {
        NAMES
    }

    /// Canonical name, or `"custom"` for a diffusion kernel not in the
    /// known set.
    pub fn name(&self) -> &'static str {
        match self {
            Dither::None => "none",
            Dither::ErrorDiffusion(diffusion) => {
                let kernel = diffusion.kernel();
                [
                    ("floyd-steinberg", FLOYD_STEINBERG),
                    ("atkinson", ATKINSON),
                    ("burkes", BURKES),
                    ("jarvis-judice-ninke", JARVIS_JUDICE_NINKE),
                    ("sierra", SIERRA),
                    ("sierra-two-row", SIERRA_TWO_ROW),
                    ("sierra-lite", SIERRA_LITE),
                    ("stevenson-arce", STEVENSON_ARCE),
                    ("stucki", STUCKI),
                ]
                .into_iter()
                .find(|(_, known)| known == kernel)
                .map_or("custom", |(name, _)| name)
            }
            Dither::Ordered(ordered) => match ordered.size() {
                2 => "bayer2",
                3 => "ordered3",
                4 => "bayer4",
                8 => "bayer8",
                _ => "bayer16",
            },
        }
    }

    /// Whether this strategy carries error between pixels.
    ///
    /// Diffusing strategies must visit pixels in row-major order.
    pub fn diffuses_error(&self) -> bool {
        matches!(self, Dither::ErrorDiffusion(_))
    }

    /// Start a pass over a `width` x `height` frame.
    ///
    /// `palette_len` sets the ordered-dither spread and `scale` (0.0..=1.0)
    /// the strength. The accumulator is allocated here and owned by the pass.
    pub fn begin(
        &self,
        width: usize,
        height: usize,
        palette_len: usize,
        scale: f32,
    ) -> Result<DitherPass<'_>, QuantizeError> {
        if width == 0 || height == 0 {
            return Err(QuantizeError::ZeroDimension { width, height });
        }
        Ok(DitherPass::new(
            self,
            width,
            height,
            scale,
            palette_spread(palette_len),
        ))
    }

    /// Stateless adjustment for pixel `(x, y)`.
    ///
    /// Ordered dithering returns the offset color and `None` returns `color`.
    /// Error diffusion has no stateless form and also returns `color`; use a
    /// [`DitherPass`] for it.
    #[inline]
    pub fn offset_at(
        &self,
        color: Rgba,
        x: usize,
        y: usize,
        scale: f32,
        palette_len: usize,
    ) -> Rgba {
        self.offset_with_spread(color, x, y, scale, palette_spread(palette_len))
    }

    #[inline]
    pub(crate) fn offset_with_spread(
        &self,
        color: Rgba,
        x: usize,
        y: usize,
        scale: f32,
        spread: f32,
    ) -> Rgba {
        match self {
            Dither::Ordered(ordered) => ordered.adjust(color, x, y, scale, spread),
            Dither::None | Dither::ErrorDiffusion(_) => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves_and_round_trips() {
        for &name in Dither::names() {
            let dither = Dither::from_name(name).unwrap_or_else(|| panic!("{name} not found"));
            assert_eq!(dither.name(), name);
        }
    }

    #[test]
    fn test_from_name_is_forgiving() {
        assert_eq!(
            Dither::from_name("  Floyd-Steinberg "),
            Some(Dither::ErrorDiffusion(ErrorDiffusion::floyd_steinberg()))
        );
        assert_eq!(Dither::from_name("riemersma"), None);
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(Dither::default(), Dither::None);
        assert!(!Dither::None.diffuses_error());
    }

    #[test]
    fn test_custom_kernel_name() {
        const RIGHT_ONLY: Kernel = Kernel {
            entries: &[(1, 0, 1)],
            divisor: 1,
            max_dy: 0,
        };
        let dither = Dither::ErrorDiffusion(ErrorDiffusion::new(RIGHT_ONLY));
        assert_eq!(dither.name(), "custom");
        assert!(dither.diffuses_error());
    }

    #[test]
    fn test_begin_rejects_zero_dimensions() {
        assert_eq!(
            Dither::None.begin(0, 4, 2, 1.0).unwrap_err(),
            QuantizeError::ZeroDimension {
                width: 0,
                height: 4
            }
        );
    }

    #[test]
    fn test_offset_at() {
        let color = Rgba::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(Dither::None.offset_at(color, 3, 3, 1.0, 2), color);
        assert_eq!(
            Dither::ErrorDiffusion(ErrorDiffusion::atkinson()).offset_at(color, 0, 0, 1.0, 2),
            color
        );

        let bayer = Dither::from_name("bayer2").unwrap();
        let top_left = bayer.offset_at(color, 0, 0, 1.0, 2);
        assert!((top_left.r - 0.25).abs() < 1e-6);
        // Spread shrinks with palette size.
        let big = bayer.offset_at(color, 0, 0, 1.0, 216);
        assert!(big.r > top_left.r && big.r < 0.5);
    }
}
