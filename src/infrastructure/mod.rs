//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `declaration/` - App directory reader/writer
//! - `remote/` - Remote client implementations
//! - `hosting/` - Local hosting file scanner
//! - `repositories/` - Asset cache persistence
//! - `events/` - Event sinks (console, NDJSON)
//! - `prompt/` - Interactive prompter

pub mod declaration;
pub mod events;
pub mod fs;
pub mod hosting;
pub mod prompt;
pub mod remote;
pub mod repositories;
pub mod terminal;

// Re-export for convenience
pub use declaration::{resolve_app_dir, DirectoryDeclarationStore};
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use hosting::LocalHostingSource;
pub use prompt::DialoguerPrompter;
pub use remote::FsRemoteClient;
pub use repositories::TomlAssetCacheRepository;
