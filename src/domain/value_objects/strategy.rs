//! Import strategy value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppSyncError;

/// How remote-only entities are treated during reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStrategy {
    /// Overwrite matching entities, keep remote-only ones (secrets survive)
    #[default]
    Merge,
    /// Like merge, but remote-only entities are removed
    Replace,
}

impl ImportStrategy {
    pub const ALL: [ImportStrategy; 2] = [ImportStrategy::Merge, ImportStrategy::Replace];

    pub fn as_str(self) -> &'static str {
        match self {
            ImportStrategy::Merge => "merge",
            ImportStrategy::Replace => "replace",
        }
    }

    /// Whether entities missing from the declaration are removed remotely
    pub fn deletes_remote_only(self) -> bool {
        matches!(self, ImportStrategy::Replace)
    }
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportStrategy {
    type Err = AppSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "merge" => Ok(ImportStrategy::Merge),
            "replace" => Ok(ImportStrategy::Replace),
            other => Err(AppSyncError::Validation(format!(
                "unknown import strategy {:?}; accepted values are [merge|replace]",
                other
            ))),
        }
    }
}
