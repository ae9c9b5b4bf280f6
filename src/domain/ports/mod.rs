//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod asset_cache_repository;
pub mod declaration_store;
pub mod hosting_source;
pub mod import_events;
pub mod prompter;
pub mod remote_client;

pub use asset_cache_repository::{AssetCacheError, AssetCacheRepository, AssetCacheResult};
pub use declaration_store::{DeclarationStore, DeclarationWarning, LoadedDeclaration};
pub use hosting_source::{HostingSource, LocalAssetScan};
pub use import_events::{ImportEvent, ImportEventSink, ImportStage, NoopEventSink};
pub use prompter::Prompter;
pub use remote_client::{RemoteApp, RemoteClient};
