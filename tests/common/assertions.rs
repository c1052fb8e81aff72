//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::io::Cursor;

/// Header facts of an indexed PNG
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: png::BitDepth,
    pub palette_len: usize,
    pub trns: Option<Vec<u8>>,
}

/// Read the header of a PNG, asserting that it is indexed
pub fn read_indexed_header(bytes: &[u8]) -> IndexedHeader {
    assert_png(bytes);
    let reader = png::Decoder::new(Cursor::new(bytes))
        .read_info()
        .expect("Failed to read PNG header");
    let info = reader.info();
    assert_eq!(
        info.color_type,
        png::ColorType::Indexed,
        "Expected an indexed PNG"
    );
    IndexedHeader {
        width: info.width,
        height: info.height,
        bit_depth: info.bit_depth,
        palette_len: info.palette.as_ref().map_or(0, |p| p.len() / 3),
        trns: info.trns.as_ref().map(|t| t.to_vec()),
    }
}

/// Assert bytes carry the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.len() > 8 && bytes[..8] == [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A],
        "Expected PNG data, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..bytes.len().min(8)]
    );
}

/// Assert an indexed PNG has the given size, depth and palette length
pub fn assert_indexed_png(
    bytes: &[u8],
    width: u32,
    height: u32,
    bit_depth: png::BitDepth,
    palette_len: usize,
) -> IndexedHeader {
    let header = read_indexed_header(bytes);
    assert_eq!((header.width, header.height), (width, height));
    assert_eq!(header.bit_depth, bit_depth);
    assert_eq!(header.palette_len, palette_len);
    header
}

/// Decode any PNG to RGBA8 pixels with the crate's own decoder
pub fn decode_rgba(bytes: &[u8]) -> Vec<[u8; 4]> {
    palettize::image_io::decode_png(bytes)
        .expect("Failed to decode PNG")
        .pixels
}
