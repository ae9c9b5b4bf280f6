//! Asset cache entity - remembers content hashes of hosted files
//!
//! Hashing every static asset on every run is the expensive step of a hosting
//! import. The cache maps a file's hosting path to the hash last computed for
//! it, together with the size and modification time observed at that point.
//! A stored hash is trusted as long as size and mtime still match.
//!
//! It's a pure data structure - I/O is handled by `AssetCacheRepository`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

/// Cached facts about one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetCacheEntry {
    hash: String,
    last_modified: DateTime<Utc>,
    size: u64,
}

impl AssetCacheEntry {
    pub fn new(hash: impl Into<String>, last_modified: DateTime<Utc>, size: u64) -> Self {
        Self {
            hash: hash.into(),
            last_modified,
            size,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the file observed on disk is the one this entry was hashed from
    pub fn is_fresh(&self, last_modified: DateTime<Utc>, size: u64) -> bool {
        self.last_modified == last_modified && self.size == size
    }
}

/// Path → hash cache with dirty tracking
#[derive(Debug, Clone, PartialEq)]
pub struct AssetCache {
    version: u32,
    entries: BTreeMap<String, AssetCacheEntry>,
    dirty: bool,
    /// Entries whose hash held but whose size or mtime moved
    refreshed: bool,
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetCache {
    /// Current on-disk format version
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            entries: BTreeMap::new(),
            dirty: false,
            refreshed: false,
        }
    }

    /// Rebuild a cache from persisted entries; the result is clean.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, AssetCacheEntry)>) -> Self {
        Self {
            version: Self::VERSION,
            entries: entries.into_iter().collect(),
            dirty: false,
            refreshed: false,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, path: &str) -> Option<&AssetCacheEntry> {
        self.entries.get(path)
    }

    pub fn get_hash(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(|e| e.hash())
    }

    /// Hash for `path` if the cached entry still describes the file on disk
    pub fn fresh_hash(&self, path: &str, last_modified: DateTime<Utc>, size: u64) -> Option<&str> {
        self.entries
            .get(path)
            .filter(|e| e.is_fresh(last_modified, size))
            .map(|e| e.hash())
    }

    /// Record an entry. The cache becomes dirty only when the path is new or
    /// its hash changed; returns whether that happened.
    ///
    /// A same-hash entry with a new size or mtime leaves the cache clean but
    /// still needs saving, or the next run would rehash the file again.
    pub fn put(&mut self, path: impl Into<String>, entry: AssetCacheEntry) -> bool {
        let path = path.into();
        let changed = match self.entries.get(&path) {
            None => true,
            Some(existing) if existing.hash != entry.hash => true,
            Some(existing) => {
                if !existing.is_fresh(entry.last_modified, entry.size) {
                    self.refreshed = true;
                }
                false
            }
        };
        self.entries.insert(path, entry);
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Drop entries whose paths are not in `keep`; returns how many were removed.
    pub fn prune(&mut self, keep: &BTreeSet<String>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, _| keep.contains(path));
        let removed = before - self.entries.len();
        if removed > 0 {
            self.dirty = true;
        }
        removed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether any entry got a new size or mtime without a hash change
    pub fn is_refreshed(&self) -> bool {
        self.refreshed
    }

    /// Whether persisting would change what is on disk
    pub fn needs_save(&self) -> bool {
        self.dirty || self.refreshed
    }

    /// Force the next save (used after a cache reset)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called once the cache has been persisted
    pub fn mark_clean(&mut self) {
        self.dirty = false;
        self.refreshed = false;
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &AssetCacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
