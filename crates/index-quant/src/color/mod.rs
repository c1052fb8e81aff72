//! Color types and the pixel conversion boundary
//!
//! [`Rgba`] is the only color type the quantizer reasons about. Callers
//! with other pixel layouts implement or use one of the provided [`Pixel`]
//! conversions.
//!
//! # Example
//!
//! ```
//! use index_quant::{Pixel, Rgba};
//!
//! let from_bytes = [128u8, 64, 32, 255].to_rgba();
//! assert_eq!(from_bytes.to_bytes(), [128, 64, 32, 255]);
//!
//! let parsed: Rgba = "#804020".parse().unwrap();
//! assert_eq!(parsed, from_bytes);
//! ```

mod pixel;
mod rgba;

pub use pixel::Pixel;
pub use rgba::{Residual, Rgba};
