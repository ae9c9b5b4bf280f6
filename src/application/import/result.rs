//! Import Result

/// How an import run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The declaration was pushed and the local directory re-synced
    Imported {
        client_id: String,
        /// A new remote app was created for this run
        created: bool,
        config_changes: usize,
        asset_changes: usize,
    },
    /// The deployed app already matches the declaration
    NoChanges { client_id: String },
    /// The user declined creation or confirmation; nothing was changed
    Declined,
}

impl ImportOutcome {
    pub fn client_id(&self) -> Option<&str> {
        match self {
            ImportOutcome::Imported { client_id, .. } | ImportOutcome::NoChanges { client_id } => {
                Some(client_id)
            }
            ImportOutcome::Declined => None,
        }
    }

    pub fn is_imported(&self) -> bool {
        matches!(self, ImportOutcome::Imported { .. })
    }
}
