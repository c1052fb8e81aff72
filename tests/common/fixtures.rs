//! Test fixtures: PNG builders and a scratch directory.

use std::path::PathBuf;
use tempfile::TempDir;

/// Palettes that exercise each output bit depth
pub mod palettes {
    /// Two entries, 1-bit output
    pub const BLACK_WHITE: &str = "#000000,#FFFFFF";

    /// Three entries, 2-bit output
    pub const TRAFFIC: &str = "#FF0000,#FFFF00,#00FF00";

    /// Fully transparent first entry, forces a tRNS chunk
    pub const TRANSPARENT_BW: &str = "#00000000,#FFFFFF";
}

/// Scratch directory that is removed when dropped
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }
}

/// Encode raw 8-bit samples as a PNG of the given color type
pub fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf
}

/// RGBA PNG whose pixels come from `f(x, y)`
pub fn rgba_png(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&f(x, y));
        }
    }
    encode_png(width, height, png::ColorType::Rgba, &data)
}

/// Opaque RGBA PNG filled with one color
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    rgba_png(width, height, |_, _| [rgb[0], rgb[1], rgb[2], 255])
}

/// Opaque horizontal grey ramp, black on the left to white on the right
pub fn grey_ramp_png(width: u32, height: u32) -> Vec<u8> {
    rgba_png(width, height, |x, _| {
        let v = if width > 1 {
            (x * 255 / (width - 1)) as u8
        } else {
            0
        };
        [v, v, v, 255]
    })
}

/// 8-bit greyscale PNG without alpha
pub fn grayscale_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let data = vec![value; (width * height) as usize];
    encode_png(width, height, png::ColorType::Grayscale, &data)
}
