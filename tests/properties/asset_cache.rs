//! Property tests for the hosting hash cache.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use proptest::prelude::*;

use appsync::domain::entities::{AssetCache, AssetCacheEntry};
use appsync::domain::ports::AssetCacheRepository;
use appsync::infrastructure::TomlAssetCacheRepository;

fn asset_path() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap();
    proptest::collection::vec(segment, 1..=3).prop_map(|segments| format!("/{}", segments.join("/")))
}

fn entry() -> impl Strategy<Value = (String, i64, u64)> {
    (
        "[0-9a-f]{64}",
        0i64..4_000_000_000,
        0u64..10_000_000,
    )
}

fn to_entry((hash, secs, size): &(String, i64, u64)) -> AssetCacheEntry {
    let modified = DateTime::<Utc>::from_timestamp(*secs, 0).unwrap();
    AssetCacheEntry::new(hash.clone(), modified, *size)
}

fn snapshot(cache: &AssetCache) -> BTreeMap<String, (String, DateTime<Utc>, u64)> {
    cache
        .entries()
        .map(|(path, e)| {
            (
                path.to_string(),
                (e.hash().to_string(), e.last_modified(), e.size()),
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: save then load reproduces every path, hash and stamp.
    #[test]
    fn property_cache_save_load_round_trips(
        entries in proptest::collection::btree_map(asset_path(), entry(), 0..8)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".appsync").join("hosting-cache.toml");
        let cache = AssetCache::from_entries(
            entries.iter().map(|(p, e)| (p.clone(), to_entry(e))),
        );

        let repo = TomlAssetCacheRepository::new();
        repo.save(&cache, &path).unwrap();
        let loaded = repo.load(&path).unwrap();

        prop_assert_eq!(snapshot(&loaded), snapshot(&cache));
        prop_assert!(!loaded.is_dirty());
    }

    /// PROPERTY: recording the same hash twice only dirties the cache once.
    #[test]
    fn property_same_hash_twice_is_not_dirty(
        path in asset_path(),
        raw in entry(),
    ) {
        let mut cache = AssetCache::new();
        prop_assert!(cache.put(path.clone(), to_entry(&raw)));
        prop_assert!(cache.is_dirty());

        cache.mark_clean();
        prop_assert!(!cache.put(path.clone(), to_entry(&raw)));
        prop_assert!(!cache.is_dirty());
        prop_assert_eq!(cache.get_hash(&path), Some(raw.0.as_str()));
    }
}
