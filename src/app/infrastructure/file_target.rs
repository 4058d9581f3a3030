//! Secondary preview windows backed by HTML files in the temp directory
//! and shown by the system browser.

use std::fs;
use std::path::{Path, PathBuf};

use crate::app::controllers::preview::RenderTarget;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::assembler::inject_before_head_end;

/// Get the temp directory for preview window files.
pub fn preview_dir() -> PathBuf {
    std::env::temp_dir().join("pagepad-preview")
}

/// Remove the preview directory and every file left in it.
pub fn cleanup_preview_dir() {
    let _ = fs::remove_dir_all(preview_dir());
}

pub struct FileTarget {
    path: PathBuf,
    /// Browser reload interval in seconds, 0 disables it.
    refresh_secs: u32,
    open: bool,
}

impl FileTarget {
    /// Target writing `preview-<index>.html` inside `dir`.
    pub fn new(dir: &Path, index: usize, refresh_secs: u32) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(format!("preview-{}.html", index)),
            refresh_secs,
            open: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hand the file to the system browser. The file must have been
    /// rendered at least once.
    pub fn open_in_browser(&self) -> Result<()> {
        open::that(&self.path).map_err(|e| AppError::TargetUnavailable(format!("{}: {}", self.name(), e)))
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            let _ = fs::remove_file(&self.path);
        }
    }

    fn with_refresh(&self, document: &str) -> String {
        if self.refresh_secs == 0 {
            return document.to_string();
        }
        let meta = format!("    <meta http-equiv=\"refresh\" content=\"{}\">\n", self.refresh_secs);
        inject_before_head_end(document, &meta).unwrap_or_else(|| document.to_string())
    }
}

impl RenderTarget for FileTarget {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn render(&mut self, document: &str) -> Result<()> {
        if !self.open {
            return Err(AppError::TargetUnavailable(self.name()));
        }
        fs::write(&self.path, self.with_refresh(document))
            .map_err(|e| AppError::TargetUnavailable(format!("{}: {}", self.name(), e)))
    }
}

impl Drop for FileTarget {
    fn drop(&mut self) {
        self.close();
    }
}
