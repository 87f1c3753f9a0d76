//! Staged file writes.
//!
//! Output is written to a `.tmp` sibling first and only renamed into place on
//! commit. A staged file that is dropped without being committed removes its
//! temporary copy, so an aborted run leaves nothing behind.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};

/// A fully written temporary file waiting to be renamed over `path`.
#[derive(Debug)]
pub struct StagedFile {
    tmp_path: PathBuf,
    path: PathBuf,
    committed: bool,
}

/// Temporary sibling used while staging `path`.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("staged"));
    tmp_name.push(".tmp");
    path.with_file_name(tmp_name)
}

impl StagedFile {
    /// Write `contents` to the staging path of `path`.
    pub fn write(path: &Path, contents: &str) -> Result<Self> {
        let tmp_path = staging_path(path);
        let staged = Self {
            tmp_path,
            path: path.to_path_buf(),
            committed: false,
        };
        fs::write(&staged.tmp_path, contents)
            .with_context(|| format!("Failed to write {}", staged.tmp_path.display()))?;
        Ok(staged)
    }

    /// Rename the staged file into place.
    pub fn commit(mut self) -> Result<PathBuf> {
        fs::rename(&self.tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to move {} to {}",
                self.tmp_path.display(),
                self.path.display()
            )
        })?;
        self.committed = true;
        Ok(self.path.clone())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed && self.tmp_path.exists() {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                log::warn!("Failed to remove {}: {}", self.tmp_path.display(), e);
            }
        }
    }
}
