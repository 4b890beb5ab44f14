//! Error types shared across the crate

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CullError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The image source has nothing left to show for this session
    #[error("No more images to show")]
    Exhausted,

    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("Cannot move into {}: it exists and is not a directory", .0.display())]
    DeletedDirNotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, CullError>;

impl CullError {
    /// True for the end-of-session condition rather than a real failure
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CullError::Exhausted)
    }
}
