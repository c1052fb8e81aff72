//! Palette sources and the bounded-palette materialization rule.

use super::palette::{DistanceMetric, Palette};
use crate::color::Rgba;
use crate::error::QuantizeError;

/// What to do when a source offers more colors than `max_colors` allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationPolicy {
    /// Keep the first `max_colors` entries in source order and drop the rest.
    ///
    /// Callers that care which colors survive must order the source by
    /// priority.
    #[default]
    Truncate,

    /// Refuse oversized sources with [`QuantizeError::PaletteTooLarge`].
    Reject,
}

/// A provider of an ordered color sequence to quantize against.
///
/// Fixed lists implement this trivially. A derived-palette algorithm
/// (octree, median cut, ...) would implement it by exposing the colors it
/// built. The only requirement is that the sequence is non-empty; the
/// quantizer checks this when it is constructed.
pub trait PaletteSource: Send + Sync {
    /// The source colors in priority order.
    fn colors(&self) -> &[Rgba];
}

/// A caller-supplied, fixed list of colors.
///
/// # Example
///
/// ```
/// use index_quant::{FixedPalette, PaletteSource, Rgba};
///
/// let source = FixedPalette::new(vec![Rgba::BLACK, Rgba::WHITE]);
/// assert_eq!(source.colors().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPalette {
    colors: Vec<Rgba>,
}

impl FixedPalette {
    /// Wrap a list of colors.
    pub fn new(colors: Vec<Rgba>) -> Self {
        Self { colors }
    }

    /// Parse a list of hex strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, QuantizeError> {
        let colors = colors
            .iter()
            .map(|s| s.as_ref().parse::<Rgba>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }
}

impl From<Palette> for FixedPalette {
    fn from(palette: Palette) -> Self {
        Self::new(palette.colors().to_vec())
    }
}

impl PaletteSource for FixedPalette {
    fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl PaletteSource for Vec<Rgba> {
    fn colors(&self) -> &[Rgba] {
        self
    }
}

/// Build the bounded palette for one frame.
///
/// Takes `min(source.len(), max_colors)` entries in source order. The caller
/// has already validated `max_colors`.
pub(crate) fn materialize(
    source: &[Rgba],
    max_colors: usize,
    truncation: TruncationPolicy,
    metric: DistanceMetric,
) -> Result<Palette, QuantizeError> {
    if source.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }
    if source.len() > max_colors {
        match truncation {
            TruncationPolicy::Reject => {
                return Err(QuantizeError::PaletteTooLarge {
                    len: source.len(),
                    max: max_colors,
                });
            }
            TruncationPolicy::Truncate => {
                tracing::debug!(
                    source_len = source.len(),
                    max_colors,
                    dropped = source.len() - max_colors,
                    "Truncating palette source"
                );
            }
        }
    }
    let len = source.len().min(max_colors);
    Ok(Palette::new(&source[..len])?.with_distance_metric(metric))
}
