use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use index_quant::Dither;
use palettize::config::{AppConfig, Truncation};
use palettize::pipeline::{self, JobSettings, BUILTIN_PALETTES};

#[derive(Parser)]
#[command(name = "palettize")]
#[command(about = "Convert full-color PNG images to indexed color with dithering")]
struct Cli {
    /// Config file (default: ./palettize.yaml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize a PNG file to an indexed PNG
    Quantize {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Palette name or comma-separated hex colors (e.g. "#000000,#FFFFFF")
        #[arg(short, long)]
        palette: Option<String>,

        /// Dithering algorithm (see `palettize dithers`)
        #[arg(short, long)]
        dither: Option<String>,

        /// Dithering strength, 0.0 to 1.0
        #[arg(short = 's', long)]
        dither_scale: Option<f32>,

        /// Maximum palette size, 1 to 256
        #[arg(short = 'n', long)]
        max_colors: Option<usize>,

        /// Match colors on RGB only
        #[arg(long)]
        ignore_alpha: bool,

        /// Handling of palettes longer than --max-colors
        #[arg(long, value_enum)]
        truncation: Option<Truncation>,
    },
    /// List built-in and configured palettes
    Palettes,
    /// List dithering algorithms
    Dithers,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettize=info,index_quant=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Quantize {
            input,
            output,
            palette,
            dither,
            dither_scale,
            max_colors,
            ignore_alpha,
            truncation,
        } => {
            let mut settings = JobSettings::from(&config.defaults);
            if let Some(palette) = palette {
                settings.palette = palette;
            }
            if let Some(dither) = dither {
                settings.dither = dither;
            }
            if let Some(scale) = dither_scale {
                settings.dither_scale = scale;
            }
            if let Some(max) = max_colors {
                settings.max_colors = max;
            }
            if ignore_alpha {
                settings.ignore_alpha = true;
            }
            if let Some(truncation) = truncation {
                settings.truncation = truncation;
            }
            run_quantize_command(&input, &output, &settings, &config)
        }
        Commands::Palettes => {
            run_palettes_command(&config);
            Ok(())
        }
        Commands::Dithers => {
            run_dithers_command();
            Ok(())
        }
    }
}

/// Quantize one file and print a summary
fn run_quantize_command(
    input: &Path,
    output: &Path,
    settings: &JobSettings,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let outcome = pipeline::quantize_file(input, output, settings, config)?;
    println!(
        "Wrote {} ({}x{}, {} of {} colors, {} bytes)",
        output.display(),
        outcome.width,
        outcome.height,
        outcome.colors_used,
        outcome.palette_len,
        outcome.bytes
    );
    Ok(())
}

/// Print palette names with their sizes
fn run_palettes_command(config: &AppConfig) {
    println!("Built-in palettes:");
    for name in BUILTIN_PALETTES {
        let len = pipeline::builtin_palette(name).map_or(0, |p| p.len());
        println!("  {name:<12} {len} colors");
    }

    if !config.palettes.is_empty() {
        println!("\nConfigured palettes:");
        let mut names: Vec<_> = config.palettes.keys().collect();
        names.sort();
        for name in names {
            println!("  {name:<12} {} colors", config.palettes[name].len());
        }
    }
}

/// Print dither names, grouped by kind
fn run_dithers_command() {
    println!("Dithering algorithms:");
    for name in Dither::names() {
        let kind = match Dither::from_name(name) {
            Some(Dither::None) | None => "",
            Some(Dither::ErrorDiffusion(_)) => "error diffusion",
            Some(Dither::Ordered(_)) => "ordered",
        };
        println!("  {name:<20} {kind}");
    }
}
