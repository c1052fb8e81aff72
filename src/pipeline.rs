//! Resolve names into a quantizer and run it over PNG data.

use std::path::Path;

use index_quant::{
    Dither, DistanceMetric, FixedPalette, IndexedImage, Palette, PaletteQuantizer, Quantizer,
    QuantizerOptions, Rgba,
};

use crate::config::{AppConfig, Defaults, Truncation};
use crate::error::AppError;
use crate::image_io;

const GAMEBOY: [&str; 4] = ["#0F380F", "#306230", "#8BAC0F", "#9BBC0F"];

/// Built-in palette names, in display order.
pub const BUILTIN_PALETTES: &[&str] = &["web-safe", "bw", "grey4", "grey16", "gameboy"];

/// Look up a built-in palette.
pub fn builtin_palette(name: &str) -> Option<Palette> {
    match name {
        "web-safe" => Some(Palette::web_safe()),
        "bw" => Palette::new(&[Rgba::BLACK, Rgba::WHITE]).ok(),
        "grey4" => Palette::grey_ramp(4).ok(),
        "grey16" => Palette::grey_ramp(16).ok(),
        "gameboy" => Palette::from_hex(&GAMEBOY).ok(),
        _ => None,
    }
}

/// Resolve a palette argument.
///
/// Accepts an inline comma-separated hex list (`"#000,#FFF"`), a palette
/// defined in the config, or a built-in name, in that order. Config
/// palettes shadow built-ins of the same name.
pub fn resolve_palette(spec: &str, config: &AppConfig) -> Result<FixedPalette, AppError> {
    let spec = spec.trim();
    if spec.starts_with('#') || spec.contains(',') {
        let colors: Vec<&str> = spec
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        return Ok(FixedPalette::from_hex(&colors)?);
    }
    if let Some(colors) = config.palettes.get(spec) {
        return Ok(FixedPalette::from_hex(colors)?);
    }
    builtin_palette(spec)
        .map(FixedPalette::from)
        .ok_or_else(|| AppError::UnknownPalette(spec.to_string()))
}

/// Resolve a dither name.
pub fn resolve_dither(name: &str) -> Result<Dither, AppError> {
    Dither::from_name(name).ok_or_else(|| AppError::UnknownDither(name.to_string()))
}

/// Settings for one quantize run: config defaults with command-line
/// overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSettings {
    pub palette: String,
    pub dither: String,
    pub dither_scale: f32,
    pub max_colors: usize,
    pub ignore_alpha: bool,
    pub truncation: Truncation,
}

impl From<&Defaults> for JobSettings {
    fn from(d: &Defaults) -> Self {
        Self {
            palette: d.palette.clone(),
            dither: d.dither.clone(),
            dither_scale: d.dither_scale,
            max_colors: d.max_colors,
            ignore_alpha: d.ignore_alpha,
            truncation: d.truncation,
        }
    }
}

impl JobSettings {
    /// Build quantizer options. Range checks happen when the quantizer is
    /// created.
    pub fn options(&self) -> Result<QuantizerOptions, AppError> {
        let metric = if self.ignore_alpha {
            DistanceMetric::Rgb
        } else {
            DistanceMetric::Rgba
        };
        Ok(QuantizerOptions::new()
            .max_colors(self.max_colors)
            .dither(resolve_dither(&self.dither)?)
            .dither_scale(self.dither_scale)
            .metric(metric)
            .truncation(self.truncation.into()))
    }

    /// Build the quantizer descriptor for these settings.
    pub fn quantizer(&self, config: &AppConfig) -> Result<PaletteQuantizer, AppError> {
        let source = resolve_palette(&self.palette, config)?;
        Ok(PaletteQuantizer::new(source, self.options()?)?)
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOutcome {
    pub width: usize,
    pub height: usize,
    pub palette_len: usize,
    /// Number of distinct palette entries that appear in the output.
    pub colors_used: usize,
    pub bytes: usize,
}

/// Quantize an in-memory PNG. Returns the indexed image and its encoding.
pub fn quantize_png(
    input: &[u8],
    settings: &JobSettings,
    config: &AppConfig,
) -> Result<(IndexedImage, Vec<u8>), AppError> {
    let quantizer = settings.quantizer(config)?;
    let image = image_io::decode_png(input)?;

    let mut frame = quantizer.frame_quantizer()?;
    let indexed = frame.quantize(&image.pixels, image.width, image.height)?;
    let encoded = image_io::encode_indexed_png(&indexed)?;
    Ok((indexed, encoded))
}

/// Quantize a PNG file and write the indexed result to `output`.
pub fn quantize_file(
    input: &Path,
    output: &Path,
    settings: &JobSettings,
    config: &AppConfig,
) -> Result<QuantizeOutcome, AppError> {
    let bytes = std::fs::read(input)?;
    let (indexed, encoded) = quantize_png(&bytes, settings, config)?;
    std::fs::write(output, &encoded)?;

    let mut used = [false; index_quant::MAX_PALETTE_COLORS];
    for &i in indexed.indices() {
        used[i as usize] = true;
    }
    let outcome = QuantizeOutcome {
        width: indexed.width(),
        height: indexed.height(),
        palette_len: indexed.palette().len(),
        colors_used: used.iter().filter(|&&u| u).count(),
        bytes: encoded.len(),
    };
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        width = outcome.width,
        height = outcome.height,
        palette = %settings.palette,
        dither = %settings.dither,
        colors_used = outcome.colors_used,
        "Quantized image"
    );
    Ok(outcome)
}
