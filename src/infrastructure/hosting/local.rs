//! Local Hosting Source
//!
//! Walks the hosting files directory, hashing each file unless the asset
//! cache already holds a hash for the same size and modification time.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;

use crate::domain::entities::{
    normalize_asset_path, AssetAttribute, AssetCache, AssetCacheEntry, AssetDescription,
    AssetMetadata,
};
use crate::domain::ports::{HostingSource, LocalAssetScan};
use crate::error::{AppSyncError, AppSyncResult};
use crate::infrastructure::fs::LocalFs;

/// Hosting source reading static files from local disk
pub struct LocalHostingSource {
    fs: LocalFs,
}

impl LocalHostingSource {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for LocalHostingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostingSource for LocalHostingSource {
    fn load_descriptions(&self, metadata_file: &Path) -> AppSyncResult<Vec<AssetDescription>> {
        if !self.fs.exists(metadata_file) {
            return Ok(Vec::new());
        }
        let text = self.fs.read_to_string(metadata_file)?;
        let mut descriptions: Vec<AssetDescription> = serde_json::from_str(&text)
            .map_err(|e| AppSyncError::malformed(metadata_file, e.to_string()))?;
        for description in &mut descriptions {
            description.file_path = normalize_asset_path(&description.file_path);
        }
        Ok(descriptions)
    }

    fn scan(
        &self,
        app_id: &str,
        root: &Path,
        descriptions: &[AssetDescription],
        cache: &mut AssetCache,
    ) -> AppSyncResult<LocalAssetScan> {
        let mut scan = LocalAssetScan::default();
        if !root.is_dir() {
            return Ok(scan);
        }

        let attrs_by_path: HashMap<&str, &[AssetAttribute]> = descriptions
            .iter()
            .map(|d| (d.file_path.as_str(), d.attrs.as_slice()))
            .collect();

        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| AppSyncError::Io(std::io::Error::other(e)))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let file_path = normalize_asset_path(&relative.to_string_lossy());

            let metadata = entry
                .metadata()
                .map_err(|e| AppSyncError::Io(std::io::Error::other(e)))?;
            let size = metadata.len();
            let modified: DateTime<Utc> = metadata.modified()?.into();

            let hash = match cache.fresh_hash(&file_path, modified, size) {
                Some(hash) => hash.to_string(),
                None => {
                    let hash = self.fs.hash_file(path)?.into_string();
                    cache.put(
                        file_path.clone(),
                        AssetCacheEntry::new(hash.clone(), modified, size),
                    );
                    scan.rehashed += 1;
                    hash
                }
            };

            let mut asset = AssetMetadata::new(file_path, hash);
            asset.app_id = app_id.to_string();
            asset.file_size = size;
            asset.last_modified = Some(modified);
            asset.attrs = attrs_by_path
                .get(asset.file_path.as_str())
                .map(|attrs| attrs.to_vec())
                .unwrap_or_default();
            scan.assets.push(asset);
        }

        Ok(scan)
    }

    fn read_asset(&self, root: &Path, file_path: &str) -> AppSyncResult<Vec<u8>> {
        self.fs.read(&asset_location(root, file_path))
    }
}

fn asset_location(root: &Path, file_path: &str) -> PathBuf {
    root.join(file_path.trim_start_matches('/'))
}
