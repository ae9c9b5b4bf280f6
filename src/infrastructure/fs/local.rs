//! Local File System Helpers
//!
//! Atomic writes, content hashing and home directory expansion shared by the
//! on-disk adapters.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::value_objects::ContentHash;
use crate::error::AppSyncResult;

/// Local file system access
///
/// Provides atomic writes, home directory expansion, and hashing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }

    pub fn read_to_string(&self, path: &Path) -> AppSyncResult<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    pub fn read(&self, path: &Path) -> AppSyncResult<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }

    /// Write via a temp file in the same directory, then rename over `path`.
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> AppSyncResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut tmp = NamedTempFile::new_in(&parent)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    pub fn remove(&self, path: &Path) -> AppSyncResult<()> {
        Ok(std::fs::remove_file(path)?)
    }

    /// SHA-256 of a file's content, streamed
    pub fn hash_file(&self, path: &Path) -> AppSyncResult<ContentHash> {
        Ok(ContentHash::from_reader(File::open(path)?)?)
    }

    pub fn expand_home(&self, path: &Path) -> PathBuf {
        expand_home(path)
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = if text == "~" {
        ""
    } else if let Some(rest) = text.strip_prefix("~/") {
        rest
    } else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Nearest directory at or above `start` that contains `file_name`
pub fn find_dir_containing(start: &Path, file_name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file_name).is_file())
        .map(Path::to_path_buf)
}
