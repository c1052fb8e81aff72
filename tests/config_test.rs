//! Config loading and its effect on quantize runs.

mod common;

use common::{fixtures, Workspace};
use pretty_assertions::assert_eq;

use index_quant::QuantizeError;
use palettize::config::{AppConfig, Truncation};
use palettize::error::AppError;
use palettize::pipeline::{quantize_file, quantize_png, JobSettings};

const CONFIG: &str = r##"
palettes:
  sepia: ["#2B1D0E", "#704214", "#C19A6B", "#F5DEB3"]
  primaries: ["#FF0000", "#00FF00", "#0000FF", "#FFFFFF", "#000000"]
defaults:
  palette: sepia
  dither: atkinson
  dither_scale: 0.75
"##;

#[test]
fn test_load_explicit_file() {
    let ws = Workspace::new();
    let path = ws.write("palettize.yaml", CONFIG.as_bytes());

    let config = AppConfig::load(Some(path.as_path()));

    assert_eq!(config.palettes.len(), 2);
    assert_eq!(config.palettes["primaries"].len(), 5);
    assert_eq!(config.defaults.palette, "sepia");
    assert_eq!(config.defaults.dither, "atkinson");
    assert_eq!(config.defaults.dither_scale, 0.75);
    assert_eq!(config.defaults.truncation, Truncation::Truncate);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let ws = Workspace::new();
    let config = AppConfig::load(Some(ws.path("absent.yaml").as_path()));
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let ws = Workspace::new();
    let path = ws.write("broken.yaml", b"palettes: [this is: not, a map");
    assert_eq!(AppConfig::load(Some(path.as_path())), AppConfig::default());
}

#[test]
fn test_config_defaults_drive_quantize() {
    let ws = Workspace::new();
    let config_path = ws.write("palettize.yaml", CONFIG.as_bytes());
    let config = AppConfig::load(Some(config_path.as_path()));
    let input = ws.write("ramp.png", &fixtures::grey_ramp_png(10, 10));
    let output = ws.path("sepia.png");

    let settings = JobSettings::from(&config.defaults);
    let outcome = quantize_file(&input, &output, &settings, &config).unwrap();

    assert_eq!(outcome.palette_len, 4);
    let bytes = std::fs::read(&output).unwrap();
    common::assert_indexed_png(&bytes, 10, 10, png::BitDepth::Two, 4);
}

#[test]
fn test_reject_oversized_config_palette() {
    let config = AppConfig::from_yaml(CONFIG).unwrap();
    let mut settings = JobSettings::from(&config.defaults);
    settings.palette = "primaries".to_string();
    settings.max_colors = 3;
    settings.truncation = Truncation::Reject;

    let err = quantize_png(&fixtures::solid_png(2, 2, [255, 0, 0]), &settings, &config)
        .unwrap_err();

    assert!(
        matches!(
            err,
            AppError::Quantize(QuantizeError::PaletteTooLarge { len: 5, .. })
        ),
        "got {err:?}"
    );
}

#[test]
fn test_truncate_oversized_config_palette() {
    let config = AppConfig::from_yaml(CONFIG).unwrap();
    let mut settings = JobSettings::from(&config.defaults);
    settings.palette = "primaries".to_string();
    settings.max_colors = 3;
    settings.dither = "none".to_string();

    // Pure white is not among the first three entries.
    let (indexed, _) =
        quantize_png(&fixtures::solid_png(2, 2, [255, 255, 255]), &settings, &config).unwrap();

    assert_eq!(indexed.palette().len(), 3);
    assert!(indexed.indices().iter().all(|&i| i < 3));
}
