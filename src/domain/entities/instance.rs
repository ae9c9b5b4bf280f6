//! Instance data - which deployed app a local directory belongs to

use serde::{Deserialize, Serialize};

/// Contents of the `instance.json` file next to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceData {
    /// Client-facing identifier of the deployed app (e.g. `todo-abcde`)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_model: Option<String>,
}

impl InstanceData {
    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Default::default()
        }
    }

    /// Whether this directory has ever been linked to a deployed app
    pub fn is_linked(&self) -> bool {
        !self.client_id.is_empty()
    }
}
