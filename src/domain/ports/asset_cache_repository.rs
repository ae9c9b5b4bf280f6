//! AssetCacheRepository port - abstraction for asset cache persistence
//!
//! This trait allows the import flow to load/save the asset cache
//! without knowing about TOML serialization details.

use std::path::Path;

use thiserror::Error;

use crate::domain::entities::AssetCache;

/// Result type for asset cache operations
pub type AssetCacheResult<T> = Result<T, AssetCacheError>;

/// Asset cache operation errors
#[derive(Debug, Error)]
pub enum AssetCacheError {
    /// Invalid cache file format
    #[error("invalid asset cache format: {0}")]
    InvalidFormat(String),
    /// Cache written by an incompatible version
    #[error("asset cache format incompatible (found version {found}, expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
    /// I/O error
    #[error("asset cache I/O error: {0}")]
    Io(String),
}

/// Abstract repository for asset cache persistence
pub trait AssetCacheRepository {
    /// Load the cache at `path`; a missing file yields an empty cache.
    fn load(&self, path: &Path) -> AssetCacheResult<AssetCache>;

    /// Persist the cache to `path`, creating parent directories.
    fn save(&self, cache: &AssetCache, path: &Path) -> AssetCacheResult<()>;
}
