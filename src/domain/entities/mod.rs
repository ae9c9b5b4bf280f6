//! Domain Entities
//!
//! Core domain objects: the application graph, hosted asset metadata, and the
//! asset hash cache.

mod application;
mod asset;
mod asset_cache;
mod instance;

pub use application::{
    Application, AuthProvider, Cluster, Pipeline, PipelineParameter, Service, ServiceRule, Value,
    Webhook,
};
pub use asset::{normalize_asset_path, AssetAttribute, AssetDescription, AssetMetadata};
pub use asset_cache::{AssetCache, AssetCacheEntry};
pub use instance::InstanceData;
