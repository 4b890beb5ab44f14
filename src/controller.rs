//! The display controller: current image, walker position and session journal

use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::domain::{
    move_to_deleted, ConflictPolicy, ImageInfo, JpegWalker, MoveRecord, SessionStatistics,
};
use crate::error::{CullError, Result};
use crate::preview::{load_image, ImageView};

/// The image on screen
#[derive(Debug)]
pub struct CurrentImage {
    pub info: ImageInfo,
    pub view: ImageView,
}

#[derive(Debug)]
pub enum DisplayState {
    /// Nothing shown yet
    Idle,
    Showing(CurrentImage),
    /// The walker ran dry; no further advance is possible
    Exhausted,
}

/// A message for the status line about something that did not go to plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Moved { from: PathBuf, to: PathBuf },
    WouldMove(PathBuf),
    MoveFailed { path: PathBuf, reason: String },
    Skipped { path: PathBuf, reason: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Moved { from, to } => {
                write!(f, "Moved {} -> {}", from.display(), to.display())
            }
            Notice::WouldMove(path) => write!(f, "[dry run] Would move {}", path.display()),
            Notice::MoveFailed { path, reason } => {
                write!(f, "Could not move {}: {}", path.display(), reason)
            }
            Notice::Skipped { path, reason } => {
                write!(f, "Skipped unreadable {}: {}", path.display(), reason)
            }
        }
    }
}

impl Notice {
    pub fn is_problem(&self) -> bool {
        matches!(self, Notice::MoveFailed { .. } | Notice::Skipped { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    pub dry_run: bool,
    pub on_conflict: ConflictPolicy,
}

/// Drives a culling session over a single walk of the root directory
pub struct DisplayController {
    walker: JpegWalker,
    state: DisplayState,
    options: ControllerOptions,
    stats: SessionStatistics,
    journal: Vec<MoveRecord>,
    notices: Vec<Notice>,
}

impl DisplayController {
    pub fn new(walker: JpegWalker, options: ControllerOptions) -> Self {
        Self {
            walker,
            state: DisplayState::Idle,
            options,
            stats: SessionStatistics::default(),
            journal: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn current(&self) -> Option<&CurrentImage> {
        match &self.state {
            DisplayState::Showing(current) => Some(current),
            _ => None,
        }
    }

    pub fn current_mut(&mut self) -> Option<&mut CurrentImage> {
        match &mut self.state {
            DisplayState::Showing(current) => Some(current),
            _ => None,
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current().map(|c| c.info.path.as_path())
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, DisplayState::Exhausted)
    }

    pub fn is_dry_run(&self) -> bool {
        self.options.dry_run
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.stats
    }

    /// Every move made this session, oldest first
    pub fn journal(&self) -> &[MoveRecord] {
        &self.journal
    }

    /// Notices raised by the most recent command
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Shows the next readable image.
    ///
    /// Files that fail to decode are skipped with a notice. Returns
    /// `CullError::Exhausted` once the walk has nothing left.
    pub fn advance(&mut self) -> Result<()> {
        self.notices.clear();
        self.show_next()
    }

    /// Moves the current image into its `deleted` folder, then advances.
    ///
    /// A failed move is reported as a notice and does not stop the advance.
    pub fn delete_then_advance(&mut self) -> Result<()> {
        self.notices.clear();

        if let Some(path) = self.current_path().map(Path::to_path_buf) {
            self.archive(path);
        }

        self.show_next()
    }

    fn archive(&mut self, path: PathBuf) {
        if self.options.dry_run {
            log::info!("[dry run] Would move {}", path.display());
            self.stats.moved += 1;
            self.notices.push(Notice::WouldMove(path));
            return;
        }

        match move_to_deleted(&path, self.options.on_conflict) {
            Ok(to) => {
                log::info!("Moved {} -> {}", path.display(), to.display());
                self.stats.moved += 1;
                self.journal.push(MoveRecord {
                    from: path.clone(),
                    to: to.clone(),
                    moved_at: Utc::now(),
                });
                self.notices.push(Notice::Moved { from: path, to });
            }
            Err(e) => {
                log::error!("Failed to move {}: {}", path.display(), e);
                self.stats.failed_moves += 1;
                self.notices.push(Notice::MoveFailed {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn show_next(&mut self) -> Result<()> {
        if self.is_exhausted() {
            return Err(CullError::Exhausted);
        }

        for path in self.walker.by_ref() {
            match Self::open(&path, self.stats.shown + 1) {
                Ok(current) => {
                    log::debug!("Showing {}", path.display());
                    self.stats.shown += 1;
                    self.state = DisplayState::Showing(current);
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("Skipping unreadable image {}: {}", path.display(), e);
                    self.stats.skipped_unreadable += 1;
                    self.notices.push(Notice::Skipped {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        log::info!("No more images under {}", self.walker.root().display());
        self.state = DisplayState::Exhausted;
        Err(CullError::Exhausted)
    }

    fn open(path: &Path, position: usize) -> Result<CurrentImage> {
        let image = load_image(path)?;
        let view = ImageView::new(image);
        let info = ImageInfo::from_path(path, view.dimensions(), position)?;
        Ok(CurrentImage { info, view })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_jpeg(path: &Path, width: u32, height: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 20) as u8, (y * 20) as u8, 128])
        });
        img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
    }

    fn controller_for(root: &Path) -> DisplayController {
        DisplayController::new(JpegWalker::new(root), ControllerOptions::default())
    }

    /// a.jpg, sub/b.JPEG, sub/deleted/c.jpg, other.txt
    fn sample_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_jpeg(&root.join("a.jpg"), 8, 6);
        write_jpeg(&root.join("sub").join("b.JPEG"), 6, 8);
        write_jpeg(&root.join("sub").join("deleted").join("c.jpg"), 4, 4);
        fs::write(root.join("other.txt"), b"text").unwrap();
        temp_dir
    }

    #[test]
    fn test_starts_idle() {
        let temp_dir = sample_tree();
        let controller = controller_for(temp_dir.path());

        assert!(matches!(controller.state(), DisplayState::Idle));
        assert!(controller.current_path().is_none());
        assert_eq!(controller.statistics(), &SessionStatistics::default());
    }

    #[test]
    fn test_advance_shows_images_in_order() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let mut controller = controller_for(root);

        controller.advance().unwrap();
        assert_eq!(controller.current_path(), Some(root.join("a.jpg").as_path()));
        let info = &controller.current().unwrap().info;
        assert_eq!(info.dimensions, (8, 6));
        assert_eq!(info.position, 1);

        controller.advance().unwrap();
        assert_eq!(
            controller.current_path(),
            Some(root.join("sub").join("b.JPEG").as_path())
        );
        assert_eq!(controller.current().unwrap().info.position, 2);
    }

    #[test]
    fn test_exhaustion_is_reported_and_sticky() {
        let temp_dir = sample_tree();
        let mut controller = controller_for(temp_dir.path());

        controller.advance().unwrap();
        controller.advance().unwrap();

        let err = controller.advance().unwrap_err();
        assert!(err.is_exhausted());
        assert!(controller.is_exhausted());
        assert!(controller.current_path().is_none());

        assert!(controller.advance().unwrap_err().is_exhausted());
        assert!(controller.delete_then_advance().unwrap_err().is_exhausted());
        assert_eq!(controller.statistics().shown, 2);
    }

    #[test]
    fn test_end_to_end_delete_second_image() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let mut controller = controller_for(root);

        controller.advance().unwrap();
        controller.advance().unwrap();
        let result = controller.delete_then_advance();

        assert!(result.unwrap_err().is_exhausted());
        assert!(root.join("a.jpg").exists());
        assert!(!root.join("sub").join("b.JPEG").exists());
        assert!(root.join("sub").join("deleted").join("b.JPEG").exists());
        assert!(root.join("sub").join("deleted").join("c.jpg").exists());
        assert!(root.join("other.txt").exists());

        let journal = controller.journal();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].from, root.join("sub").join("b.JPEG"));
        assert_eq!(journal[0].to, root.join("sub").join("deleted").join("b.JPEG"));
        assert_eq!(controller.statistics().moved, 1);
        assert_eq!(controller.statistics().kept(), 1);
    }

    #[test]
    fn test_moved_file_is_not_revisited() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_jpeg(&root.join("first.jpg"), 4, 4);
        write_jpeg(&root.join("second.jpg"), 4, 4);
        write_jpeg(&root.join("nested").join("third.jpg"), 4, 4);

        let mut controller = controller_for(root);
        let mut seen = Vec::new();

        controller.advance().unwrap();
        seen.push(controller.current_path().unwrap().to_path_buf());
        while controller.delete_then_advance().is_ok() {
            seen.push(controller.current_path().unwrap().to_path_buf());
        }

        assert_eq!(
            seen,
            vec![
                root.join("first.jpg"),
                root.join("second.jpg"),
                root.join("nested").join("third.jpg"),
            ]
        );
        assert_eq!(controller.statistics().moved, 3);
        assert!(root.join("deleted").join("first.jpg").exists());
        assert!(root.join("deleted").join("second.jpg").exists());
        assert!(root.join("nested").join("deleted").join("third.jpg").exists());
    }

    #[test]
    fn test_delete_while_idle_just_advances() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let mut controller = controller_for(root);

        controller.delete_then_advance().unwrap();

        assert_eq!(controller.current_path(), Some(root.join("a.jpg").as_path()));
        assert!(controller.journal().is_empty());
        assert!(!root.join("deleted").exists());
    }

    #[test]
    fn test_unreadable_image_is_skipped_with_notice() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a_broken.jpg"), b"garbage").unwrap();
        write_jpeg(&root.join("b_fine.jpg"), 4, 4);

        let mut controller = controller_for(root);
        controller.advance().unwrap();

        assert_eq!(controller.current_path(), Some(root.join("b_fine.jpg").as_path()));
        assert_eq!(controller.statistics().skipped_unreadable, 1);
        assert_eq!(controller.current().unwrap().info.position, 1);

        let notices = controller.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].is_problem());
        assert!(notices[0].to_string().contains("a_broken.jpg"));
    }

    #[test]
    fn test_failed_move_still_advances() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_jpeg(&root.join("a.jpg"), 4, 4);
        write_jpeg(&root.join("b.jpg"), 4, 4);

        let mut controller = controller_for(root);
        controller.advance().unwrap();

        // A plain file named "deleted" blocks the move
        fs::write(root.join("deleted"), b"in the way").unwrap();
        controller.delete_then_advance().unwrap();

        assert_eq!(controller.current_path(), Some(root.join("b.jpg").as_path()));
        assert!(root.join("a.jpg").exists());
        assert_eq!(controller.statistics().failed_moves, 1);
        assert!(controller.journal().is_empty());
        assert!(matches!(
            controller.notices()[0],
            Notice::MoveFailed { .. }
        ));
    }

    #[test]
    fn test_dry_run_does_not_move() {
        let temp_dir = sample_tree();
        let root = temp_dir.path();
        let options = ControllerOptions {
            dry_run: true,
            ..Default::default()
        };
        let mut controller = DisplayController::new(JpegWalker::new(root), options);

        controller.advance().unwrap();
        controller.delete_then_advance().unwrap();

        assert!(controller.is_dry_run());
        assert!(root.join("a.jpg").exists());
        assert!(!root.join("deleted").exists());
        assert!(controller.journal().is_empty());
        assert_eq!(controller.statistics().moved, 1);
        assert_eq!(controller.notices()[0], Notice::WouldMove(root.join("a.jpg")));
    }

    #[test]
    fn test_empty_tree_is_exhausted_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let mut controller = controller_for(temp_dir.path());

        assert!(controller.advance().unwrap_err().is_exhausted());
        assert!(controller.is_exhausted());
    }

    #[test]
    fn test_notices_reset_each_command() {
        let temp_dir = sample_tree();
        let mut controller = controller_for(temp_dir.path());

        controller.advance().unwrap();
        controller.delete_then_advance().unwrap();
        assert_eq!(controller.notices().len(), 1);

        let _ = controller.advance();
        assert!(controller.notices().is_empty());
    }
}
