use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Quantize error: {0}")]
    Quantize(#[from] index_quant::QuantizeError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown palette: {0}")]
    UnknownPalette(String),

    #[error("Unknown dither: {0} (try `palettize dithers`)")]
    UnknownDither(String),
}
