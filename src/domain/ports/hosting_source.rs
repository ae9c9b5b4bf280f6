//! Hosting Source Port
//!
//! Access to the local static files of an app: their declared attributes,
//! their metadata (hashed through the asset cache) and their bytes.

use std::path::Path;

use crate::domain::entities::{AssetCache, AssetDescription, AssetMetadata};
use crate::error::AppSyncResult;

/// Local asset metadata plus how much hashing it took
#[derive(Debug, Clone, Default)]
pub struct LocalAssetScan {
    pub assets: Vec<AssetMetadata>,
    /// Files whose hash had to be computed (cache miss or stale entry)
    pub rehashed: usize,
}

pub trait HostingSource {
    /// Declared attributes; a missing metadata file means none.
    fn load_descriptions(&self, metadata_file: &Path) -> AppSyncResult<Vec<AssetDescription>>;

    /// Metadata for every file under `root`, reusing cached hashes for files
    /// whose size and mtime are unchanged and recording fresh ones in `cache`.
    fn scan(
        &self,
        app_id: &str,
        root: &Path,
        descriptions: &[AssetDescription],
        cache: &mut AssetCache,
    ) -> AppSyncResult<LocalAssetScan>;

    /// Raw bytes of the file at hosting path `file_path`
    fn read_asset(&self, root: &Path, file_path: &str) -> AppSyncResult<Vec<u8>>;
}
