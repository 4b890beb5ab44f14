//! jpgcull - cull a folder of JPEGs from the terminal
//!
//! Walks a directory tree, shows each JPEG once, and moves rejected ones into a
//! `deleted` folder next to them.

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod logging;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use controller::{ControllerOptions, DisplayController, DisplayState, Notice};
pub use domain::{
    move_to_deleted, ConflictPolicy, ImageInfo, JpegWalker, MoveRecord, SessionStatistics,
};
pub use error::{CullError, Result};
pub use preview::scale_to_fit;
