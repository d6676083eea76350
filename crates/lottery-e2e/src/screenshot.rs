//! Screenshot capture for scenario evidence.
//!
//! PNGs land in a configurable directory with timestamped names; failed
//! and passing captures are distinguished by a name suffix. Old captures
//! are pruned after a retention window.

use crate::driver::Driver;
use crate::result::SuiteResult;
use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Retention window for [`ScreenshotDir::cleanup`]
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// A directory screenshots are written into
#[derive(Debug, Clone)]
pub struct ScreenshotDir {
    root: PathBuf,
}

impl ScreenshotDir {
    /// Create the directory (and parents) if needed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> SuiteResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory path
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Capture the current page into `<name>_<timestamp>.png`.
    ///
    /// # Errors
    ///
    /// Returns an error when the capture or the write fails.
    pub async fn capture(&self, driver: &dyn Driver, name: &str) -> SuiteResult<PathBuf> {
        let data = driver.screenshot().await?;
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let file = self.root.join(format!("{name}_{stamp}.png"));
        std::fs::write(&file, data)?;
        info!(path = %file.display(), "screenshot saved");
        Ok(file)
    }

    /// Capture with a `_FAILED` suffix.
    pub async fn capture_failure(&self, driver: &dyn Driver, name: &str) -> SuiteResult<PathBuf> {
        self.capture(driver, &format!("{name}_FAILED")).await
    }

    /// Capture with a `_SUCCESS` suffix.
    pub async fn capture_success(&self, driver: &dyn Driver, name: &str) -> SuiteResult<PathBuf> {
        self.capture(driver, &format!("{name}_SUCCESS")).await
    }

    /// Delete captures whose age is at least `max_age`. Returns how many
    /// files were removed.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be listed.
    pub fn cleanup(&self, max_age: Duration) -> SuiteResult<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            let age = modified.elapsed().unwrap_or_default();
            if age >= max_age {
                if std::fs::remove_file(entry.path()).is_ok() {
                    removed += 1;
                } else {
                    warn!(path = %entry.path().display(), "failed to remove old screenshot");
                }
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MockDriver;

    const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];

    #[tokio::test]
    async fn test_capture_writes_named_png() {
        let dir = tempfile::tempdir().unwrap();
        let shots = ScreenshotDir::new(dir.path().join("shots")).unwrap();
        let driver = MockDriver::new();
        driver.set_screenshot(PNG_MAGIC.to_vec());

        let path = shots.capture(&driver, "login_flow").await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("login_flow_"));
        assert!(name.ends_with(".png"));
        assert_eq!(std::fs::read(&path).unwrap(), PNG_MAGIC);
    }

    #[tokio::test]
    async fn test_failure_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let shots = ScreenshotDir::new(dir.path()).unwrap();
        let driver = MockDriver::new();
        driver.set_screenshot(PNG_MAGIC.to_vec());

        let path = shots.capture_failure(&driver, "draw").await.unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("draw_FAILED_"));
    }

    #[tokio::test]
    async fn test_cleanup_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let shots = ScreenshotDir::new(dir.path()).unwrap();
        let driver = MockDriver::new();
        driver.set_screenshot(PNG_MAGIC.to_vec());
        let path = shots.capture(&driver, "keep").await.unwrap();

        // Fresh files survive the default retention window...
        assert_eq!(shots.cleanup(DEFAULT_RETENTION).unwrap(), 0);
        assert!(path.exists());

        // ...and a zero threshold removes everything.
        assert_eq!(shots.cleanup(Duration::ZERO).unwrap(), 1);
        assert!(!path.exists());
    }
}
