//! Palettize - convert full-color PNG images to indexed color
//!
//! Thin application layer over the `index-quant` crate: configuration,
//! PNG decoding and indexed PNG encoding, and the glue that resolves
//! palette and dither names into a quantizer.
//! This library exposes modules for integration testing.

pub mod config;
pub mod error;
pub mod image_io;
pub mod pipeline;
