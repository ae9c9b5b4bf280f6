//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::ImportUseCase;
use crate::domain::ports::Prompter;
use crate::infrastructure::{
    DialoguerPrompter, DirectoryDeclarationStore, FsRemoteClient, LocalHostingSource,
    TomlAssetCacheRepository,
};

/// Type alias for the concrete ImportUseCase with all dependencies
pub type ConcreteImportUseCase = ImportUseCase<
    FsRemoteClient,
    DirectoryDeclarationStore,
    LocalHostingSource,
    TomlAssetCacheRepository,
>;

/// Create an import use case against the remote rooted at `remote_root`,
/// asking questions on the terminal.
pub fn create_import_use_case(remote_root: &Path) -> ConcreteImportUseCase {
    create_import_use_case_with_prompter(remote_root, Arc::new(DialoguerPrompter::new()))
}

/// Create an import use case with a specific prompter
pub fn create_import_use_case_with_prompter(
    remote_root: &Path,
    prompter: Arc<dyn Prompter>,
) -> ConcreteImportUseCase {
    ImportUseCase::new(
        FsRemoteClient::new(remote_root),
        DirectoryDeclarationStore::new(),
        LocalHostingSource::new(),
        TomlAssetCacheRepository::new(),
        prompter,
    )
}
