//! Moving culled files into a sibling `deleted` directory

use crate::error::{CullError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::DELETED_DIR_NAME;

/// What to do when `deleted/<name>` is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Pick the first free `stem (N).ext` name
    #[default]
    Rename,
    /// Replace the file already in `deleted`
    Overwrite,
    /// Refuse the move and leave the source where it is
    Fail,
}

/// Returns the `deleted` directory that sits next to `path`
pub fn deleted_dir_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(DELETED_DIR_NAME),
        _ => PathBuf::from(DELETED_DIR_NAME),
    }
}

/// Moves `path` into its sibling `deleted` directory, creating it if needed.
///
/// Returns the path the file ended up at. The file is renamed, never copied or
/// removed, so its contents are untouched.
pub fn move_to_deleted(path: &Path, policy: ConflictPolicy) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        CullError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Not a file path: {}", path.display()),
        ))
    })?;

    if !path.exists() {
        return Err(CullError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let deleted_dir = deleted_dir_for(path);
    ensure_dir(&deleted_dir)?;

    let mut target = deleted_dir.join(file_name);
    if target.exists() {
        match policy {
            ConflictPolicy::Rename => target = next_free_name(&target),
            ConflictPolicy::Overwrite => {}
            ConflictPolicy::Fail => return Err(CullError::DestinationExists(target)),
        }
    }

    fs::rename(path, &target)?;
    Ok(target)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            if dir.is_dir() {
                Ok(())
            } else {
                Err(CullError::DeletedDirNotADirectory(dir.to_path_buf()))
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn next_free_name(taken: &Path) -> PathBuf {
    let stem = taken
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = taken.extension().map(|e| e.to_string_lossy().into_owned());

    (1u32..)
        .map(|n| {
            let name = match &extension {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            };
            taken.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| taken.to_path_buf())
}
