//! Authoritative apply of a pushed payload
//!
//! What the remote service does with `push(payload, strategy)`. Under
//! `replace` the payload becomes the new state; under `merge` payload
//! entities overwrite their same-keyed remote counterparts and remote-only
//! entities survive at every level. Identifiers of matched entities are kept.

use std::collections::BTreeMap;

use crate::domain::entities::Application;
use crate::domain::value_objects::ImportStrategy;

use super::reconcile::Reconcile;

pub(crate) fn apply_collection<T: Reconcile>(
    remote: &[T],
    payload: &[T],
    strategy: ImportStrategy,
) -> Vec<T> {
    let remote_by_key: BTreeMap<String, &T> =
        remote.iter().map(|e| (e.natural_key(), e)).collect();

    match strategy {
        ImportStrategy::Replace => payload
            .iter()
            .map(|p| match remote_by_key.get(&p.natural_key()) {
                Some(existing) => existing.applied(p, strategy),
                None => p.clone(),
            })
            .collect(),
        ImportStrategy::Merge => {
            let payload_by_key: BTreeMap<String, &T> =
                payload.iter().map(|e| (e.natural_key(), e)).collect();
            let mut out: Vec<T> = remote
                .iter()
                .map(|existing| match payload_by_key.get(&existing.natural_key()) {
                    Some(p) => existing.applied(p, strategy),
                    None => existing.clone(),
                })
                .collect();
            out.extend(
                payload
                    .iter()
                    .filter(|p| !remote_by_key.contains_key(&p.natural_key()))
                    .cloned(),
            );
            out
        }
    }
}

fn owned_or(remote: &str, fallback: &str) -> String {
    if remote.is_empty() {
        fallback.to_string()
    } else {
        remote.to_string()
    }
}

/// The deployed application after `payload` was pushed with `strategy`.
///
/// Root attributes come from the payload; group, id and client id stay
/// remote-owned.
pub fn apply_payload(
    remote: &Application,
    payload: &Application,
    strategy: ImportStrategy,
) -> Application {
    Application {
        group_id: owned_or(&remote.group_id, &payload.group_id),
        name: owned_or(&payload.name, &remote.name),
        id: owned_or(&remote.id, &payload.id),
        client_id: owned_or(&remote.client_id, &payload.client_id),
        clusters: apply_collection(&remote.clusters, &payload.clusters, strategy),
        services: apply_collection(&remote.services, &payload.services, strategy),
        pipelines: apply_collection(&remote.pipelines, &payload.pipelines, strategy),
        values: apply_collection(&remote.values, &payload.values, strategy),
        auth_providers: apply_collection(&remote.auth_providers, &payload.auth_providers, strategy),
    }
}
