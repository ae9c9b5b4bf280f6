//! JSON Event Sink
//!
//! Outputs import events as NDJSON for CI/automation consumption.

use crate::domain::ports::{ImportEvent, ImportEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ImportEventSink for JsonEventSink {
    fn on_event(&self, event: ImportEvent) {
        let json = match event {
            ImportEvent::StageEntered { stage } => serde_json::json!({
                "event": "stage",
                "command": "import",
                "stage": stage.as_str(),
            }),

            ImportEvent::DeclarationWarning { file, key } => serde_json::json!({
                "event": "warning",
                "command": "import",
                "file": file.display().to_string(),
                "key": key,
            }),

            ImportEvent::AppCreated { client_id } => serde_json::json!({
                "event": "app_created",
                "command": "import",
                "client_id": client_id,
            }),

            ImportEvent::AssetsScanned { total, rehashed } => serde_json::json!({
                "event": "assets_scanned",
                "command": "import",
                "total": total,
                "rehashed": rehashed,
            }),

            ImportEvent::CacheLoadFailed { error } => serde_json::json!({
                "event": "cache_load_failed",
                "command": "import",
                "error": error,
            }),

            ImportEvent::CacheSaved { path, entries } => serde_json::json!({
                "event": "cache_saved",
                "command": "import",
                "path": path.display().to_string(),
                "entries": entries,
            }),

            ImportEvent::CacheWriteFailed { error } => serde_json::json!({
                "event": "cache_write_failed",
                "command": "import",
                "error": error,
            }),

            ImportEvent::DiffComputed {
                config_changes,
                asset_changes,
            } => serde_json::json!({
                "event": "diff",
                "command": "import",
                "config_changes": config_changes,
                "asset_changes": asset_changes,
            }),

            ImportEvent::ConfigPushed { strategy } => serde_json::json!({
                "event": "config_pushed",
                "command": "import",
                "strategy": strategy,
            }),

            ImportEvent::AssetUploaded { path } => serde_json::json!({
                "event": "asset_uploaded",
                "command": "import",
                "path": path,
            }),

            ImportEvent::AssetAttributesUpdated { path } => serde_json::json!({
                "event": "asset_attributes_updated",
                "command": "import",
                "path": path,
            }),

            ImportEvent::AssetDeleted { path } => serde_json::json!({
                "event": "asset_deleted",
                "command": "import",
                "path": path,
            }),

            ImportEvent::CdnInvalidated { count } => serde_json::json!({
                "event": "cdn_invalidated",
                "command": "import",
                "count": count,
            }),

            ImportEvent::Synced { dir } => serde_json::json!({
                "event": "synced",
                "command": "import",
                "dir": dir.display().to_string(),
            }),

            ImportEvent::Completed { client_id } => serde_json::json!({
                "event": "complete",
                "command": "import",
                "status": "success",
                "client_id": client_id,
            }),
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
