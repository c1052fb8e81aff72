//! Palette types and palette sources
//!
//! [`Palette`] is the realized, bounded color set for one frame and hosts
//! the nearest-index resolver. [`PaletteSource`] is the contract a color
//! provider must satisfy; [`FixedPalette`] is the fixed-list variant.

mod palette;
mod source;

pub use palette::{DistanceMetric, Palette, MAX_PALETTE_COLORS};
pub use source::{FixedPalette, PaletteSource, TruncationPolicy};

pub(crate) use source::materialize;
