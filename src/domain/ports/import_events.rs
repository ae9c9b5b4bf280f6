//! Import Event Port
//!
//! Provides an observable interface for import runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::fmt;
use std::path::PathBuf;

/// States of the import state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    ResolveTarget,
    CreateNew,
    UseExisting,
    PrepareAssets,
    ComputeDiff,
    Confirm,
    Apply,
    ApplyAssets,
    ReSync,
    Done,
}

impl ImportStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ImportStage::ResolveTarget => "resolve_target",
            ImportStage::CreateNew => "create_new",
            ImportStage::UseExisting => "use_existing",
            ImportStage::PrepareAssets => "prepare_assets",
            ImportStage::ComputeDiff => "compute_diff",
            ImportStage::Confirm => "confirm",
            ImportStage::Apply => "apply",
            ImportStage::ApplyAssets => "apply_assets",
            ImportStage::ReSync => "resync",
            ImportStage::Done => "done",
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event emitted during an import
#[derive(Debug, Clone)]
pub enum ImportEvent {
    /// A state of the import state machine was entered
    StageEntered { stage: ImportStage },

    /// Unknown keys were ignored while decoding the declaration
    DeclarationWarning { file: PathBuf, key: String },

    /// A new remote app was created
    AppCreated { client_id: String },

    /// Local hosting files were hashed
    AssetsScanned { total: usize, rehashed: usize },

    /// The asset cache could not be read; starting from an empty one
    CacheLoadFailed { error: String },

    /// The asset cache was persisted
    CacheSaved { path: PathBuf, entries: usize },

    /// The asset cache could not be persisted (non-fatal)
    CacheWriteFailed { error: String },

    /// Configuration and asset diffs are ready
    DiffComputed {
        config_changes: usize,
        asset_changes: usize,
    },

    /// The reconciled configuration was pushed
    ConfigPushed { strategy: String },

    AssetUploaded { path: String },

    AssetAttributesUpdated { path: String },

    AssetDeleted { path: String },

    /// Edge caches were invalidated for changed files
    CdnInvalidated { count: usize },

    /// The local directory was rewritten from the deployed state
    Synced { dir: PathBuf },

    /// Import finished
    Completed { client_id: String },
}

/// Trait for receiving import events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait ImportEventSink: Send + Sync {
    /// Handle an import event
    fn on_event(&self, event: ImportEvent);

    /// Whether stage transitions should be reported too
    fn wants_detailed_events(&self) -> bool {
        false
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ImportEventSink for NoopEventSink {
    fn on_event(&self, _event: ImportEvent) {}
}
