//! Single-frame quantization.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::options::QuantizerOptions;
use crate::color::Pixel;
use crate::error::QuantizeError;
use crate::output::IndexedImage;
use crate::palette::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Ready,
    Done,
}

/// Quantizes one frame against a realized palette.
///
/// Obtained from [`Quantizer::frame_quantizer`](super::Quantizer::frame_quantizer).
/// A frame quantizer processes exactly one frame; a second call to
/// [`quantize`](Self::quantize) fails with
/// [`QuantizeError::FrameQuantizerExhausted`] until [`reset`](Self::reset).
///
/// The palette is fixed for the lifetime of the frame quantizer and never
/// changes during a pass.
#[derive(Debug, Clone)]
pub struct FrameQuantizer {
    palette: Palette,
    options: QuantizerOptions,
    state: FrameState,
}

impl FrameQuantizer {
    pub(crate) fn new(palette: Palette, options: QuantizerOptions) -> Self {
        Self {
            palette,
            options,
            state: FrameState::Ready,
        }
    }

    /// The realized palette, at most `options().max_colors` entries.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Options in effect for this frame.
    #[inline]
    pub fn options(&self) -> &QuantizerOptions {
        &self.options
    }

    /// Whether a frame has already been processed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.state == FrameState::Done
    }

    /// Allow another frame. The palette and options stay the same.
    pub fn reset(&mut self) {
        self.state = FrameState::Ready;
    }

    /// Map every pixel of a row-major `width` x `height` frame to a palette
    /// index.
    ///
    /// The pixel buffer is read only. On error nothing is returned and, for
    /// argument errors, the frame quantizer stays usable.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::FrameQuantizerExhausted`] if a frame was already
    ///   processed
    /// - [`QuantizeError::ZeroDimension`] if `width` or `height` is zero
    /// - [`QuantizeError::DimensionMismatch`] if `pixels.len() != width * height`
    pub fn quantize<P: Pixel>(
        &mut self,
        pixels: &[P],
        width: usize,
        height: usize,
    ) -> Result<IndexedImage, QuantizeError> {
        if self.state == FrameState::Done {
            return Err(QuantizeError::FrameQuantizerExhausted);
        }
        if width == 0 || height == 0 {
            return Err(QuantizeError::ZeroDimension { width, height });
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(QuantizeError::DimensionMismatch {
                len: pixels.len(),
                width,
                height,
            });
        }

        tracing::debug!(
            width,
            height,
            palette_len = self.palette.len(),
            dither = self.options.dither.name(),
            scale = self.options.dither_scale,
            "Quantizing frame"
        );

        let indices = if self.options.dither.diffuses_error() {
            quantize_sequential(pixels, width, height, &self.palette, &self.options)?
        } else {
            quantize_independent(pixels, width, &self.palette, &self.options)
        };

        self.state = FrameState::Done;
        Ok(IndexedImage::new(indices, width, height, self.palette.clone()))
    }
}

/// Row-major adjust, resolve, record loop through a [`DitherPass`](crate::DitherPass).
fn quantize_sequential<P: Pixel>(
    pixels: &[P],
    width: usize,
    height: usize,
    palette: &Palette,
    options: &QuantizerOptions,
) -> Result<Vec<u8>, QuantizeError> {
    let mut pass = options
        .dither
        .begin(width, height, palette.len(), options.dither_scale)?;
    let mut indices = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let color = pass.adjust(pixels[i].to_rgba(), x, y)?;
            let (idx, residual) = palette.find_nearest(color);
            indices[i] = idx as u8;
            pass.record(x, y, residual)?;
        }
    }

    Ok(indices)
}

/// Per-pixel path for strategies without cross-pixel state.
#[cfg(feature = "rayon")]
fn quantize_independent<P: Pixel>(
    pixels: &[P],
    width: usize,
    palette: &Palette,
    options: &QuantizerOptions,
) -> Vec<u8> {
    let spread = crate::dither::palette_spread(palette.len());
    let mut indices = vec![0u8; pixels.len()];

    indices
        .par_chunks_mut(width)
        .zip(pixels.par_chunks(width))
        .enumerate()
        .for_each(|(y, (out, row))| {
            for (x, (slot, &pixel)) in out.iter_mut().zip(row).enumerate() {
                let color = options.dither.offset_with_spread(
                    pixel.to_rgba(),
                    x,
                    y,
                    options.dither_scale,
                    spread,
                );
                *slot = palette.find_nearest_index(color) as u8;
            }
        });

    indices
}

#[cfg(not(feature = "rayon"))]
fn quantize_independent<P: Pixel>(
    pixels: &[P],
    width: usize,
    palette: &Palette,
    options: &QuantizerOptions,
) -> Vec<u8> {
    let spread = crate::dither::palette_spread(palette.len());
    pixels
        .iter()
        .enumerate()
        .map(|(i, &pixel)| {
            let color = options.dither.offset_with_spread(
                pixel.to_rgba(),
                i % width,
                i / width,
                options.dither_scale,
                spread,
            );
            palette.find_nearest_index(color) as u8
        })
        .collect()
}
