//! Hosted asset entities
//!
//! `AssetDescription` is what the declaration says about a static file
//! (its attributes). `AssetMetadata` is what is known about a concrete file,
//! locally after hashing or remotely as last deployed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single attribute attached to a hosted file (e.g. `Content-Type`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetAttribute {
    pub name: String,
    pub value: String,
}

impl AssetAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Declared attributes for a file under the hosting root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetDescription {
    pub file_path: String,
    pub attrs: Vec<AssetAttribute>,
}

/// Metadata describing one hosted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub app_id: String,
    /// Path relative to the hosting root, always starting with `/`
    pub file_path: String,
    pub file_hash: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub attrs: Vec<AssetAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl AssetMetadata {
    pub fn new(file_path: impl Into<String>, file_hash: impl Into<String>) -> Self {
        Self {
            app_id: String::new(),
            file_path: file_path.into(),
            file_hash: file_hash.into(),
            file_size: 0,
            attrs: Vec::new(),
            last_modified: None,
        }
    }

    pub fn with_attrs(mut self, attrs: Vec<AssetAttribute>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Attributes compared as an unordered set
    pub fn attrs_match(&self, other: &AssetMetadata) -> bool {
        let mut mine = self.attrs.clone();
        let mut theirs = other.attrs.clone();
        mine.sort();
        mine.dedup();
        theirs.sort();
        theirs.dedup();
        mine == theirs
    }

    pub fn content_matches(&self, other: &AssetMetadata) -> bool {
        self.file_hash == other.file_hash
    }
}

/// Normalize a hosting path to the `/dir/file.ext` form used as the key.
pub fn normalize_asset_path(path: &str) -> String {
    let trimmed = path.replace('\\', "/");
    let trimmed = trimmed.trim_start_matches("./").trim_start_matches('/');
    format!("/{}", trimmed)
}
