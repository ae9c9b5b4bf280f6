//! TOML Asset Cache Repository
//!
//! Implements the AssetCacheRepository port using TOML format.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{AssetCache, AssetCacheEntry};
use crate::domain::ports::{AssetCacheError, AssetCacheRepository, AssetCacheResult};
use crate::infrastructure::fs::LocalFs;

/// TOML-based asset cache repository
pub struct TomlAssetCacheRepository {
    fs: LocalFs,
}

impl TomlAssetCacheRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }

    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: LocalFs) -> Self {
        Self { fs }
    }
}

impl Default for TomlAssetCacheRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// TOML representation of a cached file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlCacheEntry {
    hash: String,
    last_modified: DateTime<Utc>,
    #[serde(default)]
    size: u64,
}

/// TOML representation of the cache file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlAssetCache {
    version: u32,
    #[serde(default)]
    files: BTreeMap<String, TomlCacheEntry>,
}

impl AssetCacheRepository for TomlAssetCacheRepository {
    fn load(&self, path: &Path) -> AssetCacheResult<AssetCache> {
        if !self.fs.exists(path) {
            return Ok(AssetCache::new());
        }

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| AssetCacheError::Io(e.to_string()))?;
        let toml_cache: TomlAssetCache =
            toml::from_str(&content).map_err(|e| AssetCacheError::InvalidFormat(e.to_string()))?;

        if toml_cache.version != AssetCache::VERSION {
            return Err(AssetCacheError::VersionMismatch {
                found: toml_cache.version,
                expected: AssetCache::VERSION,
            });
        }

        Ok(AssetCache::from_entries(toml_cache.files.into_iter().map(
            |(path, entry)| {
                (
                    path,
                    AssetCacheEntry::new(entry.hash, entry.last_modified, entry.size),
                )
            },
        )))
    }

    fn save(&self, cache: &AssetCache, path: &Path) -> AssetCacheResult<()> {
        let files = cache
            .entries()
            .map(|(key, entry)| {
                (
                    key.to_string(),
                    TomlCacheEntry {
                        hash: entry.hash().to_string(),
                        last_modified: entry.last_modified(),
                        size: entry.size(),
                    },
                )
            })
            .collect();

        let toml_cache = TomlAssetCache {
            version: cache.version(),
            files,
        };

        let content = toml::to_string_pretty(&toml_cache)
            .map_err(|e| AssetCacheError::InvalidFormat(e.to_string()))?;
        self.fs
            .write_atomic(path, content.as_bytes())
            .map_err(|e| AssetCacheError::Io(e.to_string()))?;

        Ok(())
    }
}
