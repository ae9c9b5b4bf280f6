//! Error types for AppSync
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for AppSync operations
pub type AppSyncResult<T> = Result<T, AppSyncError>;

/// Main error type for AppSync operations
#[derive(Error, Debug)]
pub enum AppSyncError {
    /// The local declaration could not be decoded or failed validation
    #[error("malformed declaration in {path}: {message}")]
    MalformedDeclaration { path: PathBuf, message: String },

    /// The remote application does not exist
    #[error("app not found: {client_id}")]
    NotFound { client_id: String },

    /// Invalid input (unknown strategy, duplicate names, missing project)
    #[error("{0}")]
    Validation(String),

    /// A read-only call to the remote service failed
    #[error("failed to {operation}: {message}")]
    Remote { operation: String, message: String },

    /// A mutating call to the remote service failed
    #[error("failed to {operation}: {message}")]
    RemoteApply { operation: String, message: String },

    /// The remote was updated but the local directory could not be re-synced
    #[error("failed to sync app with local directory after {stage}: {message}")]
    SyncFailure { stage: String, message: String },

    /// Interactive prompt failed (closed stdin, no terminal)
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppSyncError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn remote(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Remote {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    /// Wrap any failure of a mutating remote call.
    pub fn remote_apply(operation: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::RemoteApply {
            operation: operation.into(),
            message: err.to_string(),
        }
    }

    pub fn sync_failure(stage: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::SyncFailure {
            stage: stage.into(),
            message: err.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the remote may already reflect the requested changes.
    pub fn is_post_apply(&self) -> bool {
        matches!(self, Self::SyncFailure { .. })
    }
}
