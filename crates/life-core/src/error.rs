//! Error types for the engine and its callers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid alive odds: {0} (expected 0.0..=1.0)")]
    InvalidProbability(f64),

    #[error("Invalid cell size: {0} (expected a positive finite span)")]
    InvalidCellSize(f64),

    #[error("Cell ({col}, {row}) is outside the {width}x{height} grid")]
    OutOfBounds {
        col: u32,
        row: u32,
        width: u32,
        height: u32,
    },

    #[error("Pixel ({x}, {y}) does not map to a cell")]
    PixelOutOfBounds { x: f64, y: f64 },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
