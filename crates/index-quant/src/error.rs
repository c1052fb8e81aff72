//! Error types for palette construction and quantization.
//!
//! [`QuantizeError`] is the single error type returned by the public API.
//! Every variant belongs to one of two kinds, see [`ErrorKind`]:
//!
//! - [`ErrorKind::InvalidArgument`]: malformed configuration or input,
//!   detected before any work is done.
//! - [`ErrorKind::InvalidState`]: a frame quantizer or dithering pass used
//!   outside its lifecycle.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3, 4, 6 or 8 digits after stripping '#')
    #[error("invalid hex color length {0} (expected 3, 4, 6 or 8 digits)")]
    InvalidLength(usize),
    /// A character that is not a hexadecimal digit
    #[error("invalid hex character: {0:?}")]
    InvalidDigit(char),
}

/// Coarse classification of a [`QuantizeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed configuration or input.
    InvalidArgument,
    /// Object reused outside its valid lifecycle.
    InvalidState,
}

/// Unified error type for the quantization API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantizeError {
    /// The palette source yielded no colors.
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// `max_colors` is outside `1..=MAX_PALETTE_COLORS`.
    #[error("max_colors must be between 1 and {max}, got {got}")]
    InvalidMaxColors {
        /// Requested value.
        got: usize,
        /// Largest supported palette size.
        max: usize,
    },

    /// Dither scale is not a finite value in `0.0..=1.0`.
    #[error("dither scale must be within 0.0..=1.0, got {0}")]
    InvalidDitherScale(f32),

    /// Image width or height is zero.
    #[error("image dimensions cannot be zero (got {width}x{height})")]
    ZeroDimension {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// Pixel buffer length does not match `width * height`.
    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch {
        /// Buffer length.
        len: usize,
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// The source palette is larger than `max_colors` and truncation is
    /// disabled.
    #[error("palette has {len} colors but at most {max} are allowed")]
    PaletteTooLarge {
        /// Source palette length.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A pixel coordinate lies outside the frame.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} frame")]
    OutOfBounds {
        /// Column that was visited.
        x: usize,
        /// Row that was visited.
        y: usize,
        /// Frame width in pixels.
        width: usize,
        /// Frame height in pixels.
        height: usize,
    },

    /// A palette color could not be parsed.
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),

    /// A dithering pass was used after its last pixel was recorded.
    #[error("dithering pass is exhausted; reset it before starting another frame")]
    PassExhausted,

    /// An error diffusion pass was driven out of scan order.
    #[error("pixel ({x}, {y}) visited out of scan order, expected ({expected_x}, {expected_y})")]
    OutOfOrder {
        /// Column that was visited.
        x: usize,
        /// Row that was visited.
        y: usize,
        /// Column the pass expected next.
        expected_x: usize,
        /// Row the pass expected next.
        expected_y: usize,
    },

    /// A frame quantizer was asked to process a second frame without reset.
    #[error("frame quantizer already processed a frame; reset it or spawn a new one")]
    FrameQuantizerExhausted,
}

impl QuantizeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuantizeError::EmptyPalette
            | QuantizeError::InvalidMaxColors { .. }
            | QuantizeError::InvalidDitherScale(_)
            | QuantizeError::ZeroDimension { .. }
            | QuantizeError::DimensionMismatch { .. }
            | QuantizeError::PaletteTooLarge { .. }
            | QuantizeError::OutOfBounds { .. }
            | QuantizeError::ParseColor(_) => ErrorKind::InvalidArgument,
            QuantizeError::PassExhausted
            | QuantizeError::OutOfOrder { .. }
            | QuantizeError::FrameQuantizerExhausted => ErrorKind::InvalidState,
        }
    }
}
