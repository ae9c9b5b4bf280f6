//! Asset Diff Engine
//!
//! Pure domain logic deciding what to do with each hosted file, given the
//! local files (hashed through the cache) and the remote asset listing.
//! No I/O happens here - uploads and deletes are issued by the caller.

use std::collections::BTreeMap;

use crate::domain::entities::AssetMetadata;
use crate::domain::value_objects::ImportStrategy;

/// Why an asset needs no remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Hash and attributes match the deployed file
    Unchanged,
    /// Only exists remotely and the strategy preserves it
    RemoteOnly,
}

/// The action to take for one hosting path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetAction {
    /// Upload a file the remote does not have
    Create,
    /// Re-upload (content changed) or only rewrite attributes
    Update { content_changed: bool },
    /// Remove a file that no longer exists locally
    Delete,
    /// Nothing to do
    Skip(SkipReason),
}

/// A planned action for a single hosting path
#[derive(Debug, Clone, PartialEq)]
pub struct AssetOperation {
    pub path: String,
    pub action: AssetAction,
    pub local: Option<AssetMetadata>,
    pub remote: Option<AssetMetadata>,
}

impl AssetOperation {
    /// Whether the local file body has to be sent
    pub fn needs_upload(&self) -> bool {
        matches!(
            self.action,
            AssetAction::Create
                | AssetAction::Update {
                    content_changed: true
                }
        )
    }

    pub fn is_attribute_update(&self) -> bool {
        matches!(
            self.action,
            AssetAction::Update {
                content_changed: false
            }
        )
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.action, AssetAction::Delete)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self.action, AssetAction::Skip(_))
    }

    /// Human-readable diff line; skips render nothing
    pub fn diff_line(&self) -> Option<String> {
        let sigil = match self.action {
            AssetAction::Create => '+',
            AssetAction::Update { .. } => '~',
            AssetAction::Delete => '-',
            AssetAction::Skip(_) => return None,
        };
        Some(format!("{} {}", sigil, self.path))
    }
}

/// Result of diffing local against remote asset metadata
#[derive(Debug, Clone, Default)]
pub struct AssetPlan {
    pub operations: Vec<AssetOperation>,
}

impl AssetPlan {
    pub fn has_changes(&self) -> bool {
        self.operations.iter().any(|op| !op.is_skip())
    }

    pub fn uploads(&self) -> impl Iterator<Item = &AssetOperation> {
        self.operations.iter().filter(|op| op.needs_upload())
    }

    pub fn attribute_updates(&self) -> impl Iterator<Item = &AssetOperation> {
        self.operations.iter().filter(|op| op.is_attribute_update())
    }

    pub fn deletes(&self) -> impl Iterator<Item = &AssetOperation> {
        self.operations.iter().filter(|op| op.is_delete())
    }

    /// Count of operations that will touch the remote
    pub fn change_count(&self) -> usize {
        self.operations.iter().filter(|op| !op.is_skip()).count()
    }

    /// Paths whose served content may change (for edge cache invalidation)
    pub fn changed_paths(&self) -> Vec<String> {
        self.operations
            .iter()
            .filter(|op| !op.is_skip())
            .map(|op| op.path.clone())
            .collect()
    }

    pub fn get(&self, path: &str) -> Option<&AssetOperation> {
        self.operations.iter().find(|op| op.path == path)
    }

    pub fn lines(&self) -> Vec<String> {
        self.operations.iter().filter_map(|op| op.diff_line()).collect()
    }
}

/// Pure asset diffing service
pub struct AssetDiffer;

impl AssetDiffer {
    /// Plan the remote calls needed to make remote assets match local ones.
    ///
    /// Local paths come first in path order, followed by remote-only paths.
    pub fn diff(
        local: &[AssetMetadata],
        remote: &[AssetMetadata],
        strategy: ImportStrategy,
    ) -> AssetPlan {
        let local_by_path: BTreeMap<&str, &AssetMetadata> =
            local.iter().map(|a| (a.file_path.as_str(), a)).collect();
        let remote_by_path: BTreeMap<&str, &AssetMetadata> =
            remote.iter().map(|a| (a.file_path.as_str(), a)).collect();

        let mut plan = AssetPlan::default();

        for (path, asset) in &local_by_path {
            let existing = remote_by_path.get(path).copied();
            let action = match existing {
                None => AssetAction::Create,
                Some(deployed) => {
                    let content_changed = !asset.content_matches(deployed);
                    if content_changed || !asset.attrs_match(deployed) {
                        AssetAction::Update { content_changed }
                    } else {
                        AssetAction::Skip(SkipReason::Unchanged)
                    }
                }
            };
            plan.operations.push(AssetOperation {
                path: path.to_string(),
                action,
                local: Some((*asset).clone()),
                remote: existing.cloned(),
            });
        }

        for (path, deployed) in &remote_by_path {
            if local_by_path.contains_key(path) {
                continue;
            }
            let action = if strategy.deletes_remote_only() {
                AssetAction::Delete
            } else {
                AssetAction::Skip(SkipReason::RemoteOnly)
            };
            plan.operations.push(AssetOperation {
                path: path.to_string(),
                action,
                local: None,
                remote: Some((*deployed).clone()),
            });
        }

        plan
    }
}
