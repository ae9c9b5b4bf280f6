//! Import Options
//!
//! Everything the import flow needs from flags, config and the environment,
//! resolved once by the caller.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ImportStrategy;

/// Default location of static files inside an app directory
pub const DEFAULT_FILES_DIR: &str = "hosting/files";
/// Default location of declared asset attributes inside an app directory
pub const DEFAULT_METADATA_FILE: &str = "hosting/metadata.json";

/// Options for the import use case
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Local app directory (already resolved and existing)
    pub app_dir: PathBuf,
    /// Client-facing id overriding the one in instance data
    pub client_id: Option<String>,
    /// Name proposed when a new app has to be created
    pub app_name: Option<String>,
    /// Group (project) to look in and to create new apps in
    pub group_id: Option<String>,
    /// Proposed group when one has to be asked for
    pub default_group: Option<String>,
    pub strategy: ImportStrategy,
    /// Sync static hosting assets too
    pub include_hosting: bool,
    /// Hosting files root, relative to `app_dir`
    pub files_dir: PathBuf,
    /// Asset attribute file, relative to `app_dir`
    pub metadata_file: PathBuf,
    /// Asset hash cache location
    pub cache_path: PathBuf,
    /// Ignore the existing asset cache and rewrite it
    pub reset_cache: bool,
    /// Invalidate edge caches for changed hosting paths
    pub reset_cdn_cache: bool,
    /// Answer every prompt with its default
    pub assume_yes: bool,
    /// Show line diffs of updated entities before confirming
    pub verbose: bool,
}

impl ImportOptions {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        let app_dir: PathBuf = app_dir.into();
        let cache_path = app_dir.join(".appsync").join("hosting-cache.toml");
        Self {
            app_dir,
            client_id: None,
            app_name: None,
            group_id: None,
            default_group: None,
            strategy: ImportStrategy::default(),
            include_hosting: false,
            files_dir: PathBuf::from(DEFAULT_FILES_DIR),
            metadata_file: PathBuf::from(DEFAULT_METADATA_FILE),
            cache_path,
            reset_cache: false,
            reset_cdn_cache: false,
            assume_yes: false,
            verbose: false,
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn with_default_group(mut self, group_id: impl Into<String>) -> Self {
        self.default_group = Some(group_id.into());
        self
    }

    pub fn with_strategy(mut self, strategy: ImportStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_hosting(mut self, include: bool) -> Self {
        self.include_hosting = include;
        self
    }

    pub fn with_files_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files_dir = dir.into();
        self
    }

    pub fn with_metadata_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.metadata_file = file.into();
        self
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_reset_cache(mut self, reset: bool) -> Self {
        self.reset_cache = reset;
        self
    }

    pub fn with_reset_cdn_cache(mut self, reset: bool) -> Self {
        self.reset_cdn_cache = reset;
        self
    }

    pub fn with_assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn hosting_root(&self) -> PathBuf {
        join_relative(&self.app_dir, &self.files_dir)
    }

    pub fn metadata_path(&self) -> PathBuf {
        join_relative(&self.app_dir, &self.metadata_file)
    }
}

fn join_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
