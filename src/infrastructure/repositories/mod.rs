//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod asset_cache;

pub use asset_cache::TomlAssetCacheRepository;
