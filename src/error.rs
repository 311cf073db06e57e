//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, PDF, image, JPEG and JSON errors, and provides semantic
//! variants for missing inputs, invalid layouts and unexpected embedded data.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {}", .path.display())]
    MissingInput { path: PathBuf },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Unsupported embedded image: {0}")]
    UnsupportedImage(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid parameter: {arg}={value}")]
    InvalidParams { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Error::MissingInput { path: path.into() }
    }
}
