//! Lazy enumeration of JPEG files under a root directory

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

use super::DELETED_DIR_NAME;

type PrunedWalk = FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>;

/// Returns true if the path has a `jpg` or `jpeg` extension, ignoring case
pub fn has_jpeg_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

/// Depth-first walk yielding every JPEG below `root`, skipping `deleted` sub-trees.
///
/// Within each directory, files are visited before subdirectories, and both are
/// ordered by name. The walk reads directories lazily as it is advanced, so it
/// can only be consumed once; start a new walker to rescan. A root that is not
/// a directory yields nothing.
pub struct JpegWalker {
    root: PathBuf,
    entries: PrunedWalk,
    done: bool,
}

impl JpegWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        // A file or missing root has nothing below it to walk
        let done = !root.is_dir();
        let entries = WalkDir::new(&root)
            .follow_links(false)
            .sort_by(files_then_dirs)
            .into_iter()
            .filter_entry(is_visited as fn(&DirEntry) -> bool);

        Self {
            root,
            entries,
            done,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn files_then_dirs(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn is_visited(entry: &DirEntry) -> bool {
    // The root is walked even when it is itself called "deleted"
    !(entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name() == DELETED_DIR_NAME)
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        // Symlinks count when they resolve to a regular file
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

impl Iterator for JpegWalker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        if self.done {
            return None;
        }

        loop {
            match self.entries.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    log::warn!("Skipping unreadable entry under {}: {}", self.root.display(), e);
                }
                Some(Ok(entry)) => {
                    if is_regular_file(&entry) && has_jpeg_extension(entry.path()) {
                        return Some(entry.into_path());
                    }
                }
            }
        }
    }
}

impl FusedIterator for JpegWalker {}
