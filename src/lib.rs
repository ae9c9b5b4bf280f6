//! AppSync - declarative import of application configuration
//!
//! AppSync reconciles a local app directory (an application graph plus
//! static hosting files) with its deployed instance. Changes are computed
//! under a `merge` or `replace` strategy, confirmed, applied, and the local
//! directory is then re-synced with the identifiers the remote assigned.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ImportOptions, ImportOutcome, ImportUseCase};
pub use config::Config;
pub use domain::entities::Application;
pub use domain::value_objects::ImportStrategy;
pub use error::{AppSyncError, AppSyncResult};
