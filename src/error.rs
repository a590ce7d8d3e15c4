use std::path::PathBuf;

use thiserror::Error;

/// Failure to populate the triplet store.
///
/// Every variant is recoverable: callers fall back to an empty store and
/// surface the message as a warning.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid triplet table: {0}")]
    SchemaInvalid(String),

    #[error("malformed triplet row: {0}")]
    Csv(#[from] csv::Error),
}

/// Failure inside a rendering backend.
///
/// An empty graph never produces this; backends emit a "nothing to show"
/// output instead.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to serialize graph description: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("invalid image size {width}x{height}")]
    ImageSize { width: u32, height: u32 },
}
