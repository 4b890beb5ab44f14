//! Log setup. The terminal belongs to the TUI, so records go to a file.

use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Default log file (~/.cache/jpgcull/jpgcull.log on Linux)
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("jpgcull").join("jpgcull.log"))
}

/// Installs the global logger, appending to `path`.
///
/// The level comes from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}

/// Installs the logger at the default location, or leaves logging off
pub fn init_default() {
    let result = match log_path() {
        Some(path) => init(&path),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine cache directory",
        )),
    };

    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {}", e);
    }
}
