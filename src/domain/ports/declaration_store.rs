//! Declaration Store Port
//!
//! Loads and writes the local application directory: the encoded
//! application graph and the instance data linking it to a deployed app.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Application, InstanceData};
use crate::error::AppSyncResult;

/// Non-fatal problem found while loading a declaration (e.g. unknown key)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationWarning {
    pub key: String,
    pub file: PathBuf,
}

/// A decoded declaration plus whatever was ignored while decoding it
#[derive(Debug, Clone)]
pub struct LoadedDeclaration {
    pub application: Application,
    pub warnings: Vec<DeclarationWarning>,
}

pub trait DeclarationStore {
    /// Decode the application graph stored in `dir`.
    fn load_application(&self, dir: &Path) -> AppSyncResult<LoadedDeclaration>;

    /// Instance data for `dir`, or `None` if the directory was never linked.
    fn load_instance_data(&self, dir: &Path) -> AppSyncResult<Option<InstanceData>>;

    fn write_instance_data(&self, dir: &Path, data: &InstanceData) -> AppSyncResult<()>;

    /// Overwrite the materialized application in `dir`.
    fn write_application(&self, dir: &Path, app: &Application) -> AppSyncResult<()>;
}
