// CLI module for argument parsing and configuration

use crate::controller::ControllerOptions;
use crate::domain::ConflictPolicy;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// jpgcull - Cull a folder of photos from the terminal
///
/// Shows every JPEG under DIRECTORY one at a time. Space keeps an image,
/// x moves it into a `deleted` folder next to it.
#[derive(Parser, Debug, Clone)]
#[command(name = "jpgcull")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to scan for JPEG files
    pub directory: PathBuf,

    /// Dry run mode - show images without moving any files
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub dry_run: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            directory: args.directory,
            dry_run: args.dry_run,
        }
    }
}

impl AppConfig {
    /// Combines the command line with the persisted conflict policy
    pub fn controller_options(&self, on_conflict: ConflictPolicy) -> ControllerOptions {
        ControllerOptions {
            dry_run: self.dry_run,
            on_conflict,
        }
    }
}
