use crate::color::Rgba;
use crate::palette::Palette;

/// Result of quantizing one frame.
///
/// Every index is below `palette().len()`.
///
/// # Example
///
/// ```
/// use index_quant::{IndexedImage, Palette, Rgba};
///
/// let palette = Palette::new(&[Rgba::BLACK, Rgba::WHITE]).unwrap();
/// let image = IndexedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.index_at(1, 0), Some(1));
/// assert_eq!(image.to_rgba8().len(), 2 * 2 * 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl IndexedImage {
    /// Wrap row-major palette indices.
    ///
    /// Debug-asserts that `indices.len() == width * height` and that every
    /// index addresses the palette.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        debug_assert!(indices.iter().all(|&i| (i as usize) < palette.len()));
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Index of pixel `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.indices[y * self.width + x])
    }

    /// Palette color of pixel `(x, y)`, or `None` outside the image.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgba> {
        self.index_at(x, y)
            .map(|idx| self.palette.color(idx as usize))
    }

    /// Expand to `[R, G, B, A, ...]` bytes, `width * height * 4` long.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let lut: Vec<[u8; 4]> = self.palette.colors().iter().map(|c| c.to_bytes()).collect();
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);
        for &idx in &self.indices {
            rgba.extend_from_slice(&lut[idx as usize]);
        }
        rgba
    }

    /// Take the indices and palette apart.
    pub fn into_parts(self) -> (Vec<u8>, Palette) {
        (self.indices, self.palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgbw() -> Palette {
        Palette::new(&[
            Rgba::from_u8(255, 0, 0, 255),
            Rgba::from_u8(0, 255, 0, 128),
            Rgba::WHITE,
        ])
        .unwrap()
    }

    #[test]
    fn test_new_stores_fields() {
        let image = IndexedImage::new(vec![0, 1, 2, 0, 1, 2], 3, 2, rgbw());
        assert_eq!(image.indices(), &[0, 1, 2, 0, 1, 2]);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.palette().len(), 3);
    }

    #[test]
    fn test_index_at() {
        let image = IndexedImage::new(vec![0, 1, 2, 2, 1, 0], 3, 2, rgbw());
        assert_eq!(image.index_at(2, 0), Some(2));
        assert_eq!(image.index_at(0, 1), Some(2));
        assert_eq!(image.index_at(3, 0), None);
        assert_eq!(image.index_at(0, 2), None);
        assert_eq!(image.color_at(1, 1), Some(Rgba::from_u8(0, 255, 0, 128)));
    }

    #[test]
    fn test_to_rgba8_layout() {
        let image = IndexedImage::new(vec![1, 2], 2, 1, rgbw());
        assert_eq!(image.to_rgba8(), vec![0, 255, 0, 128, 255, 255, 255, 255]);
    }

    #[test]
    fn test_into_parts() {
        let (indices, palette) = IndexedImage::new(vec![0], 1, 1, rgbw()).into_parts();
        assert_eq!(indices, vec![0]);
        assert_eq!(palette, rgbw());
    }
}
