//! Directory Declaration Store
//!
//! An app directory holds `app.json` (the encoded application graph) and
//! `instance.json` (which deployed app it belongs to).

use std::path::{Path, PathBuf};

use crate::domain::entities::{Application, InstanceData};
use crate::domain::ports::{DeclarationStore, DeclarationWarning, LoadedDeclaration};
use crate::error::{AppSyncError, AppSyncResult};
use crate::infrastructure::fs::{expand_home, find_dir_containing, LocalFs};

/// File holding the application graph
pub const APP_FILE: &str = "app.json";
/// File linking the directory to a deployed app
pub const INSTANCE_FILE: &str = "instance.json";

/// Declaration store backed by JSON files in an app directory
pub struct DirectoryDeclarationStore {
    fs: LocalFs,
}

impl DirectoryDeclarationStore {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for DirectoryDeclarationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationStore for DirectoryDeclarationStore {
    fn load_application(&self, dir: &Path) -> AppSyncResult<LoadedDeclaration> {
        let path = dir.join(APP_FILE);
        let text = self
            .fs
            .read_to_string(&path)
            .map_err(|e| AppSyncError::malformed(&path, e.to_string()))?;
        let (application, unknown) = Application::decode(&text, &path)?;
        let warnings = unknown
            .into_iter()
            .map(|key| DeclarationWarning {
                key,
                file: path.clone(),
            })
            .collect();
        Ok(LoadedDeclaration {
            application,
            warnings,
        })
    }

    fn load_instance_data(&self, dir: &Path) -> AppSyncResult<Option<InstanceData>> {
        let path = dir.join(INSTANCE_FILE);
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        let text = self.fs.read_to_string(&path)?;
        let data = serde_json::from_str(&text)
            .map_err(|e| AppSyncError::malformed(&path, e.to_string()))?;
        Ok(Some(data))
    }

    fn write_instance_data(&self, dir: &Path, data: &InstanceData) -> AppSyncResult<()> {
        let mut text = serde_json::to_string_pretty(data)?;
        text.push('\n');
        self.fs.write_atomic(&dir.join(INSTANCE_FILE), text.as_bytes())
    }

    fn write_application(&self, dir: &Path, app: &Application) -> AppSyncResult<()> {
        let text = app.encode()?;
        self.fs.write_atomic(&dir.join(APP_FILE), text.as_bytes())
    }
}

/// Pick the app directory for a run.
///
/// An explicit path must exist (`~` is expanded). Otherwise the nearest
/// ancestor of `cwd` holding `instance.json` wins, falling back to `cwd`.
pub fn resolve_app_dir(explicit: Option<&Path>, cwd: &Path) -> AppSyncResult<PathBuf> {
    if let Some(path) = explicit {
        let path = expand_home(path);
        if !path.is_dir() {
            return Err(AppSyncError::Validation(format!(
                "directory does not exist: {}",
                path.display()
            )));
        }
        return Ok(path);
    }
    Ok(find_dir_containing(cwd, INSTANCE_FILE).unwrap_or_else(|| cwd.to_path_buf()))
}
