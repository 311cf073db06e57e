use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Grid must be greater than 0, got: {grid}")]
    ZeroGrid { grid: u32 },

    #[error("Zoom must be a positive number, got: {zoom}")]
    InvalidZoom { zoom: f32 },

    #[error("Failed to load config {path}: {source}")]
    Config {
        path: String,
        source: cardsmith::Error,
    },

    #[error(transparent)]
    Library(#[from] cardsmith::Error),
}
