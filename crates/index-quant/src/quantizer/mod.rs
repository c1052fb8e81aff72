//! Quantizer descriptors and frame quantizers.
//!
//! A [`Quantizer`] is a reusable, thread-safe description of how to
//! quantize: a palette source plus [`QuantizerOptions`]. It holds no
//! per-frame state. Each call to [`Quantizer::frame_quantizer`] realizes
//! the bounded palette and returns a [`FrameQuantizer`] that owns
//! everything one frame needs.

mod frame;
mod options;

pub use frame::FrameQuantizer;
pub use options::QuantizerOptions;

use crate::color::Pixel;
use crate::error::QuantizeError;
use crate::output::IndexedImage;
use crate::palette::{materialize, FixedPalette, PaletteSource};

/// A quantizer descriptor.
///
/// Implementors are `Send + Sync`, so one descriptor can spawn frame
/// quantizers on several threads at once.
pub trait Quantizer: Send + Sync {
    /// Options used by [`frame_quantizer`](Self::frame_quantizer).
    fn options(&self) -> &QuantizerOptions;

    /// Spawn a frame quantizer with per-frame options.
    ///
    /// The descriptor itself is unchanged.
    fn frame_quantizer_with(
        &self,
        options: &QuantizerOptions,
    ) -> Result<FrameQuantizer, QuantizeError>;

    /// Spawn a frame quantizer with the descriptor's own options.
    fn frame_quantizer(&self) -> Result<FrameQuantizer, QuantizeError> {
        self.frame_quantizer_with(self.options())
    }
}

/// Quantizer that maps pixels onto the colors of a [`PaletteSource`].
///
/// # Example
///
/// ```
/// use index_quant::{Dither, FixedPalette, PaletteQuantizer, Quantizer, QuantizerOptions, Rgba};
///
/// let source = FixedPalette::new(vec![Rgba::BLACK, Rgba::WHITE]);
/// let quantizer =
///     PaletteQuantizer::new(source, QuantizerOptions::new().dither(Dither::None)).unwrap();
///
/// let mut frame = quantizer.frame_quantizer().unwrap();
/// let image = frame.quantize(&[[0u8, 0, 0, 255], [255, 255, 255, 255]], 2, 1).unwrap();
/// assert_eq!(image.indices(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct PaletteQuantizer<S = FixedPalette> {
    source: S,
    options: QuantizerOptions,
}

impl<S: PaletteSource> PaletteQuantizer<S> {
    /// Create a descriptor.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::InvalidMaxColors`] or
    ///   [`QuantizeError::InvalidDitherScale`] for out-of-range options
    /// - [`QuantizeError::EmptyPalette`] if the source has no colors
    pub fn new(source: S, options: QuantizerOptions) -> Result<Self, QuantizeError> {
        options.validate()?;
        if source.colors().is_empty() {
            return Err(QuantizeError::EmptyPalette);
        }
        Ok(Self { source, options })
    }

    /// The palette source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Quantize one frame with a fresh frame quantizer.
    pub fn quantize<P: Pixel>(
        &self,
        pixels: &[P],
        width: usize,
        height: usize,
    ) -> Result<IndexedImage, QuantizeError> {
        self.frame_quantizer()?.quantize(pixels, width, height)
    }
}

impl<S: PaletteSource> Quantizer for PaletteQuantizer<S> {
    fn options(&self) -> &QuantizerOptions {
        &self.options
    }

    fn frame_quantizer_with(
        &self,
        options: &QuantizerOptions,
    ) -> Result<FrameQuantizer, QuantizeError> {
        options.validate()?;
        let palette = materialize(
            self.source.colors(),
            options.max_colors,
            options.truncation,
            options.metric,
        )?;
        Ok(FrameQuantizer::new(palette, options.clone()))
    }
}
