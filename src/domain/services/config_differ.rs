//! Configuration Diff Engine
//!
//! Compares a local declaration against the deployed application under an
//! import strategy. Entities are matched by natural key at every level of
//! nesting:
//!
//! - local only → create
//! - both, with a differing attribute or descendant → update
//! - remote only → delete under `replace`, preserved under `merge`
//!
//! A renamed entity is a create plus (under `replace`) a delete. The result
//! carries the payload to push (the local graph with remote identifiers
//! adopted) and a list of changes used only for display and confirmation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use similar::{ChangeTag, TextDiff};

use crate::domain::entities::Application;
use crate::domain::value_objects::{EntityPath, ImportStrategy};

use super::reconcile::Reconcile;

/// Kind of change for an entity or attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn sigil(self) -> char {
        match self {
            ChangeKind::Create => '+',
            ChangeKind::Update => '~',
            ChangeKind::Delete => '-',
        }
    }
}

/// Before/after rendering of an updated entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDetail {
    pub before: String,
    pub after: String,
}

/// A single reconciliation decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    pub kind: ChangeKind,
    pub path: EntityPath,
    pub detail: Option<ChangeDetail>,
}

impl ConfigChange {
    pub fn new(kind: ChangeKind, path: EntityPath) -> Self {
        Self {
            kind,
            path,
            detail: None,
        }
    }

    pub fn with_detail(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.detail = Some(ChangeDetail {
            before: before.into(),
            after: after.into(),
        });
        self
    }
}

impl fmt::Display for ConfigChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.sigil(), self.path)
    }
}

fn render_entity<T: serde::Serialize>(entity: &T) -> String {
    serde_json::to_string_pretty(entity).unwrap_or_default()
}

/// Accumulates changes while walking one application graph
#[derive(Debug)]
pub struct DiffRun {
    strategy: ImportStrategy,
    changes: Vec<ConfigChange>,
}

impl DiffRun {
    fn new(strategy: ImportStrategy) -> Self {
        Self {
            strategy,
            changes: Vec::new(),
        }
    }

    /// Diff one sibling collection and return its reconciled payload.
    ///
    /// An update is recorded ahead of the changes of its descendants.
    pub fn diff_collection<T: Reconcile>(
        &mut self,
        parent: &EntityPath,
        local: &[T],
        remote: &[T],
    ) -> Vec<T> {
        let remote_by_key: BTreeMap<String, &T> =
            remote.iter().map(|e| (e.natural_key(), e)).collect();
        let mut local_keys = BTreeSet::new();
        let mut payload = Vec::with_capacity(local.len());

        for item in local {
            let key = item.natural_key();
            let path = parent.child(T::COLLECTION, &key);
            local_keys.insert(key.clone());

            match remote_by_key.get(&key) {
                None => {
                    self.changes.push(ConfigChange::new(ChangeKind::Create, path));
                    payload.push(item.clone());
                }
                Some(existing) => {
                    let mark = self.changes.len();
                    let mut reconciled = item.reconcile_children(existing, self, &path);
                    reconciled.adopt_identity(existing);

                    if !item.same_fields(existing) || self.changes.len() > mark {
                        let after = existing.applied(&reconciled, self.strategy);
                        let change = ConfigChange::new(ChangeKind::Update, path)
                            .with_detail(render_entity(*existing), render_entity(&after));
                        self.changes.insert(mark, change);
                    }
                    payload.push(reconciled);
                }
            }
        }

        if self.strategy.deletes_remote_only() {
            for existing in remote {
                let key = existing.natural_key();
                if !local_keys.contains(&key) {
                    self.changes.push(ConfigChange::new(
                        ChangeKind::Delete,
                        parent.child(T::COLLECTION, &key),
                    ));
                }
            }
        }

        payload
    }
}

/// Outcome of diffing a declaration against the deployed state
#[derive(Debug, Clone)]
pub struct ConfigDiff {
    strategy: ImportStrategy,
    changes: Vec<ConfigChange>,
    payload: Application,
}

impl ConfigDiff {
    pub fn strategy(&self) -> ImportStrategy {
        self.strategy
    }

    pub fn changes(&self) -> &[ConfigChange] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }

    /// The reconciled declaration to push along with the strategy
    pub fn payload(&self) -> &Application {
        &self.payload
    }

    pub fn into_payload(self) -> Application {
        self.payload
    }

    /// One line per decision: `+ path`, `~ path`, `- path`
    pub fn lines(&self) -> Vec<String> {
        self.changes.iter().map(|c| c.to_string()).collect()
    }

    /// Decision lines followed by line-level diffs of updated entities
    pub fn render_detailed(&self) -> String {
        let mut out = String::new();
        for change in &self.changes {
            out.push_str(&change.to_string());
            out.push('\n');
            let Some(detail) = &change.detail else {
                continue;
            };
            let text_diff = TextDiff::from_lines(detail.before.as_str(), detail.after.as_str());
            for line in text_diff.iter_all_changes() {
                let sign = match line.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => continue,
                };
                out.push_str(&format!("    {} {}\n", sign, line.value().trim_end_matches('\n')));
            }
        }
        out
    }
}

/// Strategy-aware differ for application graphs
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigDiffer {
    strategy: ImportStrategy,
}

impl ConfigDiffer {
    pub fn new(strategy: ImportStrategy) -> Self {
        Self { strategy }
    }

    pub fn diff(&self, local: &Application, remote: &Application) -> ConfigDiff {
        let mut run = DiffRun::new(self.strategy);
        let root = EntityPath::root();

        let name = if local.name.is_empty() {
            remote.name.clone()
        } else {
            local.name.clone()
        };
        if name != remote.name {
            let kind = if remote.name.is_empty() {
                ChangeKind::Create
            } else {
                ChangeKind::Update
            };
            run.changes.push(
                ConfigChange::new(kind, EntityPath::attribute("name"))
                    .with_detail(remote.name.clone(), name.clone()),
            );
        }

        let client_id = if remote.client_id.is_empty() {
            local.client_id.clone()
        } else {
            remote.client_id.clone()
        };

        let payload = Application {
            group_id: remote.group_id.clone(),
            name,
            id: remote.id.clone(),
            client_id,
            clusters: run.diff_collection(&root, &local.clusters, &remote.clusters),
            services: run.diff_collection(&root, &local.services, &remote.services),
            pipelines: run.diff_collection(&root, &local.pipelines, &remote.pipelines),
            values: run.diff_collection(&root, &local.values, &remote.values),
            auth_providers: run.diff_collection(
                &root,
                &local.auth_providers,
                &remote.auth_providers,
            ),
        };

        ConfigDiff {
            strategy: self.strategy,
            changes: run.changes,
            payload,
        }
    }
}
