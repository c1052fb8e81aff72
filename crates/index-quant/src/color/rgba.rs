//! RGBA working color type
//!
//! Every quantization decision is made on [`Rgba`]: four normalized `f32`
//! channels. Callers convert their own pixel representation at the boundary
//! through the [`Pixel`](super::Pixel) trait.

use std::str::FromStr;

use crate::error::ParseColorError;

/// Per-channel signed difference between two colors, in `[r, g, b, a]` order.
pub type Residual = [f32; 4];

/// A color with red, green, blue and alpha channels.
///
/// Channel values are normalized to `0.0..=1.0` (mapping to `0..=255` for
/// 8-bit storage). Intermediate values produced while diffusing error are
/// clamped back into that range before they reach the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    /// Red channel (0.0..=1.0)
    pub r: f32,
    /// Green channel (0.0..=1.0)
    pub g: f32,
    /// Blue channel (0.0..=1.0)
    pub b: f32,
    /// Alpha channel (0.0 transparent ..= 1.0 opaque)
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from normalized channel values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channel values.
    ///
    /// # Example
    /// ```
    /// use index_quant::Rgba;
    /// let red = Rgba::from_u8(255, 0, 0, 255);
    /// assert_eq!(red.r, 1.0);
    /// assert_eq!(red.a, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque color from 8-bit RGB values.
    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_u8(r, g, b, 255)
    }

    /// Create a color from a byte array `[R, G, B, A]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to a byte array `[R, G, B, A]`.
    ///
    /// Rounds and clamps values to the 0..=255 range.
    ///
    /// # Example
    /// ```
    /// use index_quant::Rgba;
    /// let color = Rgba::new(1.0, 0.5, -0.2, 1.0);
    /// assert_eq!(color.to_bytes(), [255, 128, 0, 255]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            to_byte(self.a),
        ]
    }

    /// Channels as an array in `[r, g, b, a]` order.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a color from an `[r, g, b, a]` array.
    #[inline]
    pub fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Signed per-channel difference `self - other`.
    #[inline]
    pub fn residual(self, other: Rgba) -> Residual {
        [
            self.r - other.r,
            self.g - other.g,
            self.b - other.b,
            self.a - other.a,
        ]
    }

    /// Add `offset` per channel and clamp the result to `0.0..=1.0`.
    ///
    /// Overflow and underflow are not errors: the excess is discarded. A NaN
    /// channel becomes `0.0`.
    #[inline]
    pub fn offset_clamped(self, offset: [f32; 4]) -> Self {
        Self {
            r: unit(self.r + offset[0]),
            g: unit(self.g + offset[1]),
            b: unit(self.b + offset[2]),
            a: unit(self.a + offset[3]),
        }
    }

    /// Clamp every channel to `0.0..=1.0`, mapping NaN to `0.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        self.offset_clamped([0.0; 4])
    }
}

/// `f32::clamp` passes NaN through, which would poison diffused error.
#[inline]
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[inline]
fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepted forms, with or without a leading `#`:
    /// - `RGB` and `RGBA` shorthand (each digit is doubled)
    /// - `RRGGBB` (opaque)
    /// - `RRGGBBAA`
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// ```
    /// use index_quant::Rgba;
    ///
    /// let white: Rgba = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgba::WHITE);
    ///
    /// let clear: Rgba = "#0000".parse().unwrap();
    /// assert_eq!(clear, Rgba::TRANSPARENT);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| d as u8)
                    .ok_or(ParseColorError::InvalidDigit(c))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let short = |i: usize| digits[i] * 17;
        let long = |i: usize| digits[i] * 16 + digits[i + 1];

        match digits.len() {
            3 => Ok(Self::from_u8(short(0), short(1), short(2), 255)),
            4 => Ok(Self::from_u8(short(0), short(1), short(2), short(3))),
            6 => Ok(Self::from_u8(long(0), long(2), long(4), 255)),
            8 => Ok(Self::from_u8(long(0), long(2), long(4), long(6))),
            n => Err(ParseColorError::InvalidLength(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_round_trip_is_exact() {
        for i in 0..=255u8 {
            let c = Rgba::from_u8(i, 255 - i, i / 2, i);
            assert_eq!(c.to_bytes(), [i, 255 - i, i / 2, i]);
        }
    }

    #[test]
    fn test_to_bytes_clamps_out_of_range() {
        let c = Rgba::new(1.7, -0.3, 0.5, 2.0);
        assert_eq!(c.to_bytes(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_residual_is_signed() {
        let a = Rgba::new(0.25, 0.5, 1.0, 1.0);
        let b = Rgba::new(0.5, 0.5, 0.0, 0.5);
        assert_eq!(a.residual(b), [-0.25, 0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_offset_clamped() {
        let c = Rgba::new(0.9, 0.1, 0.5, 1.0).offset_clamped([0.5, -0.5, 0.25, 0.3]);
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.75, 1.0));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("#F00".parse::<Rgba>().unwrap().to_bytes(), [255, 0, 0, 255]);
        assert_eq!("f008".parse::<Rgba>().unwrap().to_bytes(), [255, 0, 0, 136]);
        assert_eq!(
            "#12ab34".parse::<Rgba>().unwrap().to_bytes(),
            [0x12, 0xab, 0x34, 255]
        );
        assert_eq!(
            "  #12AB3480 ".parse::<Rgba>().unwrap().to_bytes(),
            [0x12, 0xab, 0x34, 0x80]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "#12345".parse::<Rgba>(),
            Err(ParseColorError::InvalidLength(5))
        ));
        assert_eq!(
            "#GGGGGG".parse::<Rgba>(),
            Err(ParseColorError::InvalidDigit('G'))
        );
        assert_eq!(
            "#ÿÿÿ".parse::<Rgba>(),
            Err(ParseColorError::InvalidDigit('ÿ'))
        );
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert_eq!(
            "#+F+F+F".parse::<Rgba>(),
            Err(ParseColorError::InvalidDigit('+'))
        );
        assert_eq!(
            "+FF".parse::<Rgba>(),
            Err(ParseColorError::InvalidDigit('+'))
        );
        assert_eq!(
            "#-1".parse::<Rgba>(),
            Err(ParseColorError::InvalidDigit('-'))
        );
    }

    #[test]
    fn test_nan_channels_clamp_to_zero() {
        let c = Rgba::new(f32::NAN, 0.5, 2.0, -1.0).clamped();
        assert_eq!(c, Rgba::new(0.0, 0.5, 1.0, 0.0));

        let offset = Rgba::new(0.5, 0.5, 0.5, 1.0).offset_clamped([f32::NAN, 0.0, 0.0, 0.0]);
        assert_eq!(offset, Rgba::new(0.0, 0.5, 0.5, 1.0));
    }
}
