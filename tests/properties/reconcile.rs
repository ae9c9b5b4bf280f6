//! Property tests for the configuration differ and payload application.

use proptest::prelude::*;
use serde_json::json;

use appsync::domain::entities::{Application, Pipeline, Service, Value, Webhook};
use appsync::domain::services::{apply_payload, ChangeKind, ConfigDiffer};
use appsync::ImportStrategy;

fn name_set(prefix: &'static str) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-e]{1,2}", 0..5)
        .prop_map(move |names| names.into_iter().map(|n| format!("{prefix}{n}")).collect())
}

fn pipelines(prefix: &'static str) -> impl Strategy<Value = Vec<Pipeline>> {
    name_set(prefix).prop_flat_map(|names| {
        let n = names.len();
        proptest::collection::vec(any::<bool>(), n).prop_map(move |flags| {
            names
                .iter()
                .zip(flags)
                .map(|(name, private)| Pipeline {
                    name: name.clone(),
                    private,
                    ..Default::default()
                })
                .collect()
        })
    })
}

fn values(prefix: &'static str) -> impl Strategy<Value = Vec<Value>> {
    name_set(prefix).prop_flat_map(|names| {
        let n = names.len();
        proptest::collection::vec(0u8..3, n).prop_map(move |literals| {
            names
                .iter()
                .zip(literals)
                .map(|(name, literal)| Value {
                    name: name.clone(),
                    value: json!(literal),
                })
                .collect()
        })
    })
}

fn services(prefix: &'static str) -> impl Strategy<Value = Vec<Service>> {
    (name_set(prefix), name_set("hook-")).prop_map(|(names, hooks)| {
        names
            .into_iter()
            .map(|name| Service {
                kind: "http".to_string(),
                name,
                webhooks: hooks
                    .iter()
                    .map(|hook| Webhook {
                        name: hook.clone(),
                        output: "json".to_string(),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            })
            .collect()
    })
}

fn application(prefix: &'static str) -> impl Strategy<Value = Application> {
    (pipelines(prefix), values(prefix), services(prefix)).prop_map(
        |(pipelines, values, services)| Application {
            name: "app".to_string(),
            pipelines,
            values,
            services,
            ..Default::default()
        },
    )
}

fn strategy() -> impl Strategy<Value = ImportStrategy> {
    prop_oneof![Just(ImportStrategy::Merge), Just(ImportStrategy::Replace)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: with no shared names, replace only adds deletes to merge.
    #[test]
    fn property_disjoint_keys_replace_is_merge_plus_deletes(
        local in application("l"),
        remote in application("r"),
    ) {
        let merge = ConfigDiffer::new(ImportStrategy::Merge).diff(&local, &remote);
        let replace = ConfigDiffer::new(ImportStrategy::Replace).diff(&local, &remote);

        prop_assert_eq!(merge.count(ChangeKind::Delete), 0);

        let replace_without_deletes: Vec<String> = replace
            .lines()
            .into_iter()
            .filter(|line| !line.starts_with('-'))
            .collect();
        prop_assert_eq!(merge.lines(), replace_without_deletes);

        let remote_only = remote.pipelines.len() + remote.values.len() + remote.services.len();
        prop_assert_eq!(replace.count(ChangeKind::Delete), remote_only);
    }

    /// PROPERTY: pushing the payload and diffing again finds nothing.
    #[test]
    fn property_applied_payload_rediffs_empty(
        local in application("x"),
        remote in application("x"),
        strategy in strategy(),
    ) {
        let differ = ConfigDiffer::new(strategy);
        let payload = differ.diff(&local, &remote).into_payload();
        let deployed = apply_payload(&remote, &payload, strategy);

        let again = differ.diff(&local, &deployed);
        prop_assert!(again.is_empty(), "unexpected changes: {:?}", again.lines());
    }

    /// PROPERTY: merge never loses a remote entity.
    #[test]
    fn property_merge_keeps_every_remote_name(
        local in application("x"),
        remote in application("x"),
    ) {
        let payload = ConfigDiffer::new(ImportStrategy::Merge)
            .diff(&local, &remote)
            .into_payload();
        let deployed = apply_payload(&remote, &payload, ImportStrategy::Merge);

        for pipeline in &remote.pipelines {
            prop_assert!(deployed.pipelines.iter().any(|p| p.name == pipeline.name));
        }
        for value in &remote.values {
            prop_assert!(deployed.values.iter().any(|v| v.name == value.name));
        }
    }
}
