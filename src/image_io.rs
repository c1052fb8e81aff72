//! PNG decoding to RGBA8 and indexed PNG encoding.

use std::io::Cursor;

use index_quant::IndexedImage;

use crate::error::AppError;

/// Decoded true-color image, one `[R, G, B, A]` per pixel, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

/// Decode any PNG into RGBA8.
///
/// Palette, greyscale and 16-bit inputs are expanded; missing alpha becomes
/// opaque.
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, AppError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| AppError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| AppError::PngDecode(e.to_string()))?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<[u8; 4]> = match info.color_type {
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(AppError::PngDecode(
                "indexed data was not expanded".to_string(),
            ));
        }
    };

    let width = info.width as usize;
    let height = info.height as usize;
    if pixels.len() != width * height {
        return Err(AppError::PngDecode(format!(
            "decoded {} pixels for a {}x{} image",
            pixels.len(),
            width,
            height
        )));
    }

    tracing::debug!(width, height, color_type = ?info.color_type, "Decoded PNG");
    Ok(RgbaImage {
        width,
        height,
        pixels,
    })
}

/// Smallest PNG bit depth that can address `palette_len` entries.
pub fn bit_depth_for(palette_len: usize) -> u8 {
    match palette_len {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

/// Encode as an indexed PNG with PLTE and, when any entry is translucent,
/// tRNS.
pub fn encode_indexed_png(image: &IndexedImage) -> Result<Vec<u8>, AppError> {
    let width = u32::try_from(image.width())
        .map_err(|_| AppError::PngEncode(format!("width {} too large", image.width())))?;
    let height = u32::try_from(image.height())
        .map_err(|_| AppError::PngEncode(format!("height {} too large", image.height())))?;

    let colors = image.palette().colors();
    let mut plte = Vec::with_capacity(colors.len() * 3);
    let mut trns = Vec::with_capacity(colors.len());
    for color in colors {
        let [r, g, b, a] = color.to_bytes();
        plte.extend_from_slice(&[r, g, b]);
        trns.push(a);
    }
    // Trailing opaque entries may be omitted from tRNS.
    while trns.last() == Some(&255) {
        trns.pop();
    }

    let bits = bit_depth_for(colors.len());
    let bit_depth = match bits {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    };
    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Default);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_palette(plte);
        if !trns.is_empty() {
            encoder.set_trns(trns);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }

    tracing::debug!(
        width,
        height,
        palette_len = colors.len(),
        bit_depth = bits,
        "Encoded indexed PNG"
    );
    Ok(buf.into_inner())
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Each row starts on a byte boundary; the last byte of a row is padded
/// with zero bits.
fn pack_nbits(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = width.div_ceil(pixels_per_byte);
    let height = indices.len() / width;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use index_quant::{Palette, Rgba};

    fn encode_rgba(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf
    }

    #[test]
    fn test_bit_depth_for() {
        assert_eq!(bit_depth_for(1), 1);
        assert_eq!(bit_depth_for(2), 1);
        assert_eq!(bit_depth_for(3), 2);
        assert_eq!(bit_depth_for(4), 2);
        assert_eq!(bit_depth_for(5), 4);
        assert_eq!(bit_depth_for(16), 4);
        assert_eq!(bit_depth_for(17), 8);
        assert_eq!(bit_depth_for(256), 8);
    }

    #[test]
    fn test_pack_1bit_pads_rows() {
        // 10 pixels per row: two bytes, the second carrying 2 pixels.
        let row = [1, 0, 1, 0, 1, 0, 1, 0, 1, 1];
        let mut indices = row.to_vec();
        indices.extend_from_slice(&row);
        let packed = pack_nbits(&indices, 10, 1);
        assert_eq!(packed, vec![0b1010_1010, 0b1100_0000, 0b1010_1010, 0b1100_0000]);
    }

    #[test]
    fn test_pack_2bit_and_4bit() {
        assert_eq!(pack_nbits(&[3, 2, 1, 0, 1], 5, 2), vec![0b1110_0100, 0b0100_0000]);
        assert_eq!(pack_nbits(&[0xF, 0x1, 0x7], 3, 4), vec![0xF1, 0x70]);
    }

    #[test]
    fn test_decode_rgba() {
        let data = [255, 0, 0, 255, 0, 0, 255, 128];
        let image = decode_png(&encode_rgba(2, 1, &data)).unwrap();
        assert_eq!(image.width, 2);
        assert_eq!(image.height, 1);
        assert_eq!(image.pixels, vec![[255, 0, 0, 255], [0, 0, 255, 128]]);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, AppError::PngDecode(_)));
    }

    #[test]
    fn test_indexed_roundtrip_preserves_colors() {
        let palette = Palette::new(&[
            Rgba::BLACK,
            Rgba::from_u8(255, 0, 0, 128),
            Rgba::WHITE,
        ])
        .unwrap();
        let image = IndexedImage::new(vec![0, 1, 2, 2, 1, 0, 1, 1, 1], 3, 3, palette);
        let png_bytes = encode_indexed_png(&image).unwrap();

        let decoded = decode_png(&png_bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 3));
        let flat: Vec<u8> = decoded.pixels.iter().flatten().copied().collect();
        assert_eq!(flat, image.to_rgba8());
    }

    #[test]
    fn test_indexed_header() {
        let palette = Palette::grey_ramp(16).unwrap();
        let image = IndexedImage::new((0..16).collect(), 4, 4, palette);
        let png_bytes = encode_indexed_png(&image).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&png_bytes));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Indexed);
        assert_eq!(info.bit_depth, png::BitDepth::Four);
        assert_eq!(info.palette.as_ref().map(|p| p.len()), Some(16 * 3));
        // All entries opaque: no tRNS chunk.
        assert!(info.trns.is_none());
    }
}
