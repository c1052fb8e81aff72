//! Quantization output.
//!
//! [`IndexedImage`] stores one palette index per pixel together with the
//! dimensions and the palette that produced it. The indexed form is
//! canonical; [`IndexedImage::to_rgba8`] expands it on demand.

mod indexed_image;

pub use indexed_image::IndexedImage;
