pub mod archive;
pub mod walker;

pub use archive::{deleted_dir_for, move_to_deleted, ConflictPolicy};
pub use walker::{has_jpeg_extension, JpegWalker};

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directories with this exact name hold culled files and are never walked
pub const DELETED_DIR_NAME: &str = "deleted";

/// Metadata about the image currently on screen
#[derive(Debug, Clone)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub modified_date: DateTime<Utc>,
    pub dimensions: (u32, u32),
    /// 1-based count of images shown so far, this one included
    pub position: usize,
}

impl ImageInfo {
    pub fn from_path(path: &Path, dimensions: (u32, u32), position: usize) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified_date: DateTime<Utc> = metadata.modified()?.into();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Ok(ImageInfo {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            modified_date,
            dimensions,
            position,
        })
    }
}

/// A completed move into a `deleted` directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    pub moved_at: DateTime<Utc>,
}

/// Counters for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatistics {
    pub shown: usize,
    pub moved: usize,
    pub skipped_unreadable: usize,
    pub failed_moves: usize,
}

impl SessionStatistics {
    /// Images that were shown and left in place
    pub fn kept(&self) -> usize {
        self.shown.saturating_sub(self.moved + self.failed_moves)
    }
}
