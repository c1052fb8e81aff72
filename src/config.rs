use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use index_quant::TruncationPolicy;

use crate::error::AppError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "palettize.yaml";

/// Application configuration loaded from palettize.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Named palettes, each a list of hex colors in priority order
    #[serde(default)]
    pub palettes: HashMap<String, Vec<String>>,

    /// Settings used when the command line does not override them
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default quantization settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    /// Palette name, built-in or from `palettes`
    pub palette: String,

    /// Dither name, see `palettize dithers`
    pub dither: String,

    /// Dithering strength in 0.0..=1.0
    pub dither_scale: f32,

    /// Palette size cap, 1..=256
    pub max_colors: usize,

    /// Match colors on RGB only
    pub ignore_alpha: bool,

    /// What to do with palettes longer than `max_colors`
    pub truncation: Truncation,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            palette: "web-safe".to_string(),
            dither: "floyd-steinberg".to_string(),
            dither_scale: 1.0,
            max_colors: index_quant::MAX_PALETTE_COLORS,
            ignore_alpha: false,
            truncation: Truncation::Truncate,
        }
    }
}

/// Truncation policy as spelled in config files and on the command line
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    /// Keep the first `max_colors` entries
    #[default]
    Truncate,
    /// Fail when the palette is too long
    Reject,
}

impl From<Truncation> for TruncationPolicy {
    fn from(t: Truncation) -> Self {
        match t {
            Truncation::Truncate => TruncationPolicy::Truncate,
            Truncation::Reject => TruncationPolicy::Reject,
        }
    }
}

impl AppConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults.
    ///
    /// With `path == None` the default file in the working directory is
    /// tried and its absence is not worth a warning.
    pub fn load(path: Option<&Path>) -> Self {
        let explicit = path.is_some();
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        palettes = config.palettes.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(
                    %e,
                    path = %path.display(),
                    "Failed to read config, using defaults"
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert!(config.palettes.is_empty());
        assert_eq!(config.defaults.palette, "web-safe");
        assert_eq!(config.defaults.dither, "floyd-steinberg");
        assert_eq!(config.defaults.dither_scale, 1.0);
        assert_eq!(config.defaults.max_colors, 256);
        assert!(!config.defaults.ignore_alpha);
        assert_eq!(config.defaults.truncation, Truncation::Truncate);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
palettes:
  gameboy: ["#0F380F", "#306230", "#8BAC0F", "#9BBC0F"]
defaults:
  palette: gameboy
  dither: bayer4
  dither_scale: 0.5
  ignore_alpha: true
  truncation: reject
"##;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.palettes["gameboy"].len(), 4);
        assert_eq!(config.defaults.palette, "gameboy");
        assert_eq!(config.defaults.dither, "bayer4");
        assert_eq!(config.defaults.dither_scale, 0.5);
        // Unset keys keep their defaults.
        assert_eq!(config.defaults.max_colors, 256);
        assert!(config.defaults.ignore_alpha);
        assert_eq!(config.defaults.truncation, Truncation::Reject);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml("defaults: [not, a, map]").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_truncation_into_policy() {
        assert_eq!(
            TruncationPolicy::from(Truncation::Reject),
            TruncationPolicy::Reject
        );
        assert_eq!(
            TruncationPolicy::from(Truncation::default()),
            TruncationPolicy::Truncate
        );
    }
}
