#![allow(clippy::module_inception, clippy::needless_range_loop)]

//! index-quant: map true-color frames onto a bounded palette
//!
//! This library converts RGBA pixel buffers into palette-indexed images,
//! optionally dithering to hide the banding a small palette produces.
//!
//! # Quick Start
//!
//! ```
//! use index_quant::{Dither, FixedPalette, PaletteQuantizer, Quantizer, QuantizerOptions};
//!
//! let source = FixedPalette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
//! let options = QuantizerOptions::new().dither(Dither::from_name("floyd-steinberg").unwrap());
//! let quantizer = PaletteQuantizer::new(source, options).unwrap();
//!
//! let pixels = vec![[128u8, 128, 128, 255]; 16];
//! let mut frame = quantizer.frame_quantizer().unwrap();
//! let image = frame.quantize(&pixels, 4, 4).unwrap();
//!
//! assert_eq!(image.indices().len(), 16);
//! assert!(image.indices().iter().all(|&i| i < 2));
//! ```
//!
//! # Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`PaletteSource`] | Supplies candidate colors in priority order |
//! | [`PaletteQuantizer`] | Reusable, thread-safe descriptor: source + options |
//! | [`FrameQuantizer`] | Owns the realized [`Palette`] for one frame |
//! | [`Dither`] | Strategy: none, error diffusion or ordered |
//! | [`DitherPass`] | Per-frame dithering state, `Fresh -> InUse -> Exhausted` |
//! | [`IndexedImage`] | Indices, dimensions and palette of the result |
//!
//! # Pipeline
//!
//! ```text
//! pixel (P: Pixel) -> Rgba
//!     |
//!     v
//! DitherPass::adjust      (accumulated error or matrix offset)
//!     |
//!     v
//! Palette::find_nearest   (squared Euclidean, lowest index wins ties)
//!     |
//!     +--> index written to the output
//!     |
//!     v
//! DitherPass::record      (residual pushed to unvisited neighbors)
//! ```
//!
//! Error diffusion visits pixels strictly in row-major order. Ordered
//! dithering and no dithering treat pixels independently and run
//! row-parallel when the `rayon` feature is enabled (the default).
//!
//! # Palette Size
//!
//! Palettes hold between 1 and [`MAX_PALETTE_COLORS`] (256) entries, so
//! every index fits in a `u8`. A source longer than `max_colors` is cut to
//! its first `max_colors` entries unless [`TruncationPolicy::Reject`] is set.

pub mod color;
pub mod dither;
pub mod error;
pub mod output;
pub mod palette;
pub mod quantizer;


pub use color::{Pixel, Residual, Rgba};
pub use dither::{Dither, DitherPass, ErrorDiffusion, Kernel, OrderedDither, PassPhase};
pub use error::{ErrorKind, ParseColorError, QuantizeError};
pub use output::IndexedImage;
pub use palette::{
    DistanceMetric, FixedPalette, Palette, PaletteSource, TruncationPolicy, MAX_PALETTE_COLORS,
};
pub use quantizer::{FrameQuantizer, PaletteQuantizer, Quantizer, QuantizerOptions};
