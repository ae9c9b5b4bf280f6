//! Application entity graph
//!
//! The typed form of an application declaration: the root `Application` and
//! its nested collections. Both the local declaration and the deployed state
//! decode into this graph; the reconciliation engine only ever reads it.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::value_objects::{Blob, EntityPath, Keyed};
use crate::error::{AppSyncError, AppSyncResult};

fn scoped_key(kind: &str, name: &str) -> String {
    if kind.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", kind, name)
    }
}

/// Root entity of an application declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Application {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub group_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    pub clusters: Vec<Cluster>,
    pub services: Vec<Service>,
    pub pipelines: Vec<Pipeline>,
    pub values: Vec<Value>,
    pub auth_providers: Vec<AuthProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub webhooks: Vec<Webhook>,
    pub rules: Vec<ServiceRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub output: String,
    pub pipeline: Blob,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRule {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub rule: Blob,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub output: String,
    pub private: bool,
    pub skip_rules: bool,
    pub parameters: Vec<PipelineParameter>,
    pub can_evaluate: Blob,
    pub pipeline: Blob,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParameter {
    pub name: String,
    pub required: bool,
}

/// A named literal; `value` may be any JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Value {
    pub name: String,
    pub value: JsonValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthProvider {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub enabled: bool,
    pub metadata_fields: Vec<String>,
    pub domain_restrictions: Vec<String>,
    pub redirect_uris: Vec<String>,
    pub config: Blob,
}

impl Keyed for Cluster {
    const COLLECTION: &'static str = "clusters";
    const NOUN: &'static str = "cluster";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for Service {
    const COLLECTION: &'static str = "services";
    const NOUN: &'static str = "service";

    fn natural_key(&self) -> String {
        scoped_key(&self.kind, &self.name)
    }
}

impl Keyed for Webhook {
    const COLLECTION: &'static str = "webhooks";
    const NOUN: &'static str = "webhook";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for ServiceRule {
    const COLLECTION: &'static str = "rules";
    const NOUN: &'static str = "rule";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for Pipeline {
    const COLLECTION: &'static str = "pipelines";
    const NOUN: &'static str = "pipeline";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for PipelineParameter {
    const COLLECTION: &'static str = "parameters";
    const NOUN: &'static str = "parameter";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for Value {
    const COLLECTION: &'static str = "values";
    const NOUN: &'static str = "value";

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

impl Keyed for AuthProvider {
    const COLLECTION: &'static str = "auth_providers";
    const NOUN: &'static str = "auth provider";

    fn natural_key(&self) -> String {
        scoped_key(&self.kind, &self.name)
    }
}

/// Reject duplicate natural keys within one sibling collection.
fn check_unique<T: Keyed>(items: &[T], parent: &EntityPath) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for item in items {
        let key = item.natural_key();
        if !seen.insert(key.clone()) {
            let scope = if parent.is_root() {
                T::COLLECTION.to_string()
            } else {
                format!("{}/{}", parent, T::COLLECTION)
            };
            return Err(format!("duplicate {} {:?} in {}", T::NOUN, key, scope));
        }
    }
    Ok(())
}

fn sort_by_key<T: Keyed>(items: &mut [T]) {
    items.sort_by_cached_key(|item| item.natural_key());
}

impl Application {
    /// Decode a declaration from JSON text.
    ///
    /// Unknown fields are tolerated and returned as dotted paths so callers
    /// can warn about them. Duplicate natural keys and malformed blobs fail
    /// with `MalformedDeclaration`.
    pub fn decode(text: &str, source: &Path) -> AppSyncResult<(Self, Vec<String>)> {
        let mut unknown = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let app: Application = serde_ignored::deserialize(&mut deserializer, |path| {
            unknown.push(path.to_string());
        })
        .map_err(|e| AppSyncError::malformed(source, e.to_string()))?;
        deserializer
            .end()
            .map_err(|e| AppSyncError::malformed(source, e.to_string()))?;

        app.validate()
            .map_err(|message| AppSyncError::malformed(source, message))?;
        Ok((app, unknown))
    }

    /// Encode to canonical JSON: sibling collections sorted by natural key,
    /// object keys sorted, trailing newline.
    pub fn encode(&self) -> AppSyncResult<String> {
        let mut canonical = self.clone();
        canonical.canonicalize();
        let mut out = serde_json::to_string_pretty(&canonical)?;
        out.push('\n');
        Ok(out)
    }

    /// Check natural-key uniqueness in every sibling collection.
    pub fn validate(&self) -> Result<(), String> {
        let root = EntityPath::root();
        check_unique(&self.clusters, &root)?;
        check_unique(&self.services, &root)?;
        for service in &self.services {
            let path = root.child(Service::COLLECTION, &service.natural_key());
            check_unique(&service.webhooks, &path)?;
            check_unique(&service.rules, &path)?;
        }
        check_unique(&self.pipelines, &root)?;
        for pipeline in &self.pipelines {
            let path = root.child(Pipeline::COLLECTION, &pipeline.natural_key());
            check_unique(&pipeline.parameters, &path)?;
        }
        check_unique(&self.values, &root)?;
        check_unique(&self.auth_providers, &root)?;
        Ok(())
    }

    /// Sort keyed collections so that encoding is independent of declaration
    /// order. Pipeline parameters keep their declared order.
    pub fn canonicalize(&mut self) {
        sort_by_key(&mut self.clusters);
        sort_by_key(&mut self.services);
        for service in &mut self.services {
            sort_by_key(&mut service.webhooks);
            sort_by_key(&mut service.rules);
        }
        sort_by_key(&mut self.pipelines);
        sort_by_key(&mut self.values);
        sort_by_key(&mut self.auth_providers);
    }

    /// Total number of keyed entities, nested ones included
    pub fn entity_count(&self) -> usize {
        self.clusters.len()
            + self
                .services
                .iter()
                .map(|s| 1 + s.webhooks.len() + s.rules.len())
                .sum::<usize>()
            + self
                .pipelines
                .iter()
                .map(|p| 1 + p.parameters.len())
                .sum::<usize>()
            + self.values.len()
            + self.auth_providers.len()
    }
}
