//! Conversion boundary between caller pixel formats and [`Rgba`].

use super::rgba::Rgba;

/// A pixel representation that can be quantized.
///
/// The quantizer works on [`Rgba`] internally. Anything that converts into it
/// losslessly enough for the caller's purposes can be fed to
/// [`FrameQuantizer::quantize`](crate::FrameQuantizer::quantize) directly.
pub trait Pixel: Copy + Send + Sync {
    /// Convert to the working color representation.
    fn to_rgba(self) -> Rgba;
}

/// Channels outside `0.0..=1.0` are clamped and NaN becomes `0.0`.
impl Pixel for Rgba {
    #[inline]
    fn to_rgba(self) -> Rgba {
        self.clamped()
    }
}

/// 8-bit `[R, G, B, A]`.
impl Pixel for [u8; 4] {
    #[inline]
    fn to_rgba(self) -> Rgba {
        Rgba::from_bytes(self)
    }
}

/// 8-bit `[R, G, B]`, treated as opaque.
impl Pixel for [u8; 3] {
    #[inline]
    fn to_rgba(self) -> Rgba {
        Rgba::from_u8(self[0], self[1], self[2], 255)
    }
}

/// Normalized `[r, g, b, a]`, clamped like [`Rgba`].
impl Pixel for [f32; 4] {
    #[inline]
    fn to_rgba(self) -> Rgba {
        Rgba::from_array(self).clamped()
    }
}
