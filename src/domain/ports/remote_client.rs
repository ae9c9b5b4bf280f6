//! Remote Client Port
//!
//! The deployed-app service as seen by the import flow. Transport, auth and
//! retries belong to implementations; every call either succeeds or returns
//! an error describing what failed.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Application, AssetAttribute, AssetMetadata};
use crate::domain::value_objects::ImportStrategy;
use crate::error::AppSyncResult;

/// Summary record of a deployed app
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteApp {
    pub group_id: String,
    pub id: String,
    pub client_id: String,
    pub name: String,
    pub location: String,
    pub deployment_model: String,
}

pub trait RemoteClient {
    /// Look up an app by client-facing id, optionally within one group.
    ///
    /// Returns `AppSyncError::NotFound` when no such app exists.
    fn find_app_by_client_id(&self, group_id: Option<&str>, client_id: &str)
        -> AppSyncResult<RemoteApp>;

    fn list_apps(&self, group_id: &str) -> AppSyncResult<Vec<RemoteApp>>;

    fn create_app(
        &self,
        group_id: &str,
        name: &str,
        location: &str,
        deployment_model: &str,
    ) -> AppSyncResult<RemoteApp>;

    /// Current deployed configuration
    fn export(&self, group_id: &str, app_id: &str) -> AppSyncResult<Application>;

    /// Authoritatively apply `payload` with `strategy`
    fn push(
        &self,
        group_id: &str,
        app_id: &str,
        payload: &Application,
        strategy: ImportStrategy,
    ) -> AppSyncResult<()>;

    /// Preview of what `push` would change, one line per change
    fn diff(
        &self,
        group_id: &str,
        app_id: &str,
        payload: &Application,
        strategy: ImportStrategy,
    ) -> AppSyncResult<Vec<String>>;

    fn list_assets(&self, group_id: &str, app_id: &str) -> AppSyncResult<Vec<AssetMetadata>>;

    fn upload_asset(
        &self,
        group_id: &str,
        app_id: &str,
        asset: &AssetMetadata,
        body: &[u8],
    ) -> AppSyncResult<()>;

    fn set_asset_attributes(
        &self,
        group_id: &str,
        app_id: &str,
        path: &str,
        attrs: &[AssetAttribute],
    ) -> AppSyncResult<()>;

    fn delete_asset(&self, group_id: &str, app_id: &str, path: &str) -> AppSyncResult<()>;

    /// Invalidate edge caches for the given hosting paths
    fn invalidate_cache(&self, group_id: &str, app_id: &str, paths: &[String])
        -> AppSyncResult<()>;
}
