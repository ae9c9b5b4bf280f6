//! Per-entity reconciliation rules
//!
//! Each keyed entity says which of its attributes count for equality, which
//! identifiers are remote-owned, and which nested collections it carries.
//! `ConfigDiffer` and `apply_payload` walk the graph through this trait.

use serde::Serialize;

use crate::domain::entities::{
    AuthProvider, Cluster, Pipeline, PipelineParameter, Service, ServiceRule, Value, Webhook,
};
use crate::domain::value_objects::{EntityPath, ImportStrategy, Keyed};

use super::apply::apply_collection;
use super::config_differ::DiffRun;

pub trait Reconcile: Keyed + Clone + Serialize {
    /// Compare own attributes. Identifiers and nested collections are excluded.
    fn same_fields(&self, remote: &Self) -> bool;

    /// Take over server-assigned identifiers from the matching remote entity.
    fn adopt_identity(&mut self, _remote: &Self) {}

    /// Diff nested collections, returning `self` with reconciled children.
    fn reconcile_children(&self, _remote: &Self, _run: &mut DiffRun, _path: &EntityPath) -> Self {
        self.clone()
    }

    /// Replace nested collections with the result of applying them over `remote`'s.
    fn apply_children(&mut self, _remote: &Self, _strategy: ImportStrategy) {}

    /// This remote entity after `payload` has been applied over it.
    fn applied(&self, payload: &Self, strategy: ImportStrategy) -> Self {
        let mut out = payload.clone();
        out.adopt_identity(self);
        out.apply_children(self, strategy);
        out
    }
}

fn adopt_id(local: &mut String, remote: &str) {
    if !remote.is_empty() {
        *local = remote.to_string();
    }
}

impl Reconcile for Cluster {
    fn same_fields(&self, remote: &Self) -> bool {
        self.uri == remote.uri
    }
}

impl Reconcile for Service {
    fn same_fields(&self, _remote: &Self) -> bool {
        // type and name form the key
        true
    }

    fn reconcile_children(&self, remote: &Self, run: &mut DiffRun, path: &EntityPath) -> Self {
        let mut out = self.clone();
        out.webhooks = run.diff_collection(path, &self.webhooks, &remote.webhooks);
        out.rules = run.diff_collection(path, &self.rules, &remote.rules);
        out
    }

    fn apply_children(&mut self, remote: &Self, strategy: ImportStrategy) {
        self.webhooks = apply_collection(&remote.webhooks, &self.webhooks, strategy);
        self.rules = apply_collection(&remote.rules, &self.rules, strategy);
    }
}

impl Reconcile for Webhook {
    fn same_fields(&self, remote: &Self) -> bool {
        self.output == remote.output && self.pipeline == remote.pipeline
    }

    fn adopt_identity(&mut self, remote: &Self) {
        adopt_id(&mut self.id, &remote.id);
    }
}

impl Reconcile for ServiceRule {
    fn same_fields(&self, remote: &Self) -> bool {
        self.rule == remote.rule
    }

    fn adopt_identity(&mut self, remote: &Self) {
        adopt_id(&mut self.id, &remote.id);
    }
}

impl Reconcile for Pipeline {
    fn same_fields(&self, remote: &Self) -> bool {
        self.output == remote.output
            && self.private == remote.private
            && self.skip_rules == remote.skip_rules
            && self.can_evaluate == remote.can_evaluate
            && self.pipeline == remote.pipeline
    }

    fn adopt_identity(&mut self, remote: &Self) {
        adopt_id(&mut self.id, &remote.id);
    }

    fn reconcile_children(&self, remote: &Self, run: &mut DiffRun, path: &EntityPath) -> Self {
        let mut out = self.clone();
        out.parameters = run.diff_collection(path, &self.parameters, &remote.parameters);
        out
    }

    fn apply_children(&mut self, remote: &Self, strategy: ImportStrategy) {
        self.parameters = apply_collection(&remote.parameters, &self.parameters, strategy);
    }
}

impl Reconcile for PipelineParameter {
    fn same_fields(&self, remote: &Self) -> bool {
        self.required == remote.required
    }
}

impl Reconcile for Value {
    fn same_fields(&self, remote: &Self) -> bool {
        self.value == remote.value
    }
}

impl Reconcile for AuthProvider {
    fn same_fields(&self, remote: &Self) -> bool {
        self.enabled == remote.enabled
            && self.metadata_fields == remote.metadata_fields
            && self.domain_restrictions == remote.domain_restrictions
            && self.redirect_uris == remote.redirect_uris
            && self.config == remote.config
    }

    fn adopt_identity(&mut self, remote: &Self) {
        adopt_id(&mut self.id, &remote.id);
    }
}
