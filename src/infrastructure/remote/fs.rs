//! File-backed Remote Client
//!
//! A directory standing in for the deployed-app service. Each app lives at
//! `<root>/<group>/<app id>/` with:
//!
//! - `app.json` - the app record plus hosted asset metadata
//! - `config.json` - the deployed application graph
//! - `files/` - uploaded hosting files
//!
//! Pushes go through `apply_payload`, so merge and replace behave exactly as
//! the reconciliation engine predicts. Entities still missing an identifier
//! after an apply get a fresh one derived from the app id and entity path.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::entities::{Application, AssetAttribute, AssetMetadata};
use crate::domain::ports::{RemoteApp, RemoteClient};
use crate::domain::services::{apply_payload, ConfigDiffer};
use crate::domain::value_objects::{ImportStrategy, Keyed};
use crate::error::{AppSyncError, AppSyncResult};
use crate::infrastructure::fs::LocalFs;

const RECORD_FILE: &str = "app.json";
const CONFIG_FILE: &str = "config.json";
const FILES_DIR: &str = "files";
const CLIENT_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Persisted per-app state other than the configuration graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct AppRecord {
    app: RemoteApp,
    assets: Vec<AssetMetadata>,
    /// Paths whose edge caches were invalidated, oldest first
    invalidations: Vec<String>,
}

/// Remote client over a local directory tree
pub struct FsRemoteClient {
    root: PathBuf,
    fs: LocalFs,
}

impl FsRemoteClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Paths invalidated so far for an app
    pub fn invalidations(&self, group_id: &str, app_id: &str) -> AppSyncResult<Vec<String>> {
        Ok(self.read_record(group_id, app_id)?.invalidations)
    }

    /// Where an uploaded hosting file is stored
    pub fn asset_location(&self, group_id: &str, app_id: &str, file_path: &str) -> PathBuf {
        self.app_dir(group_id, app_id)
            .join(FILES_DIR)
            .join(file_path.trim_start_matches('/'))
    }

    fn app_dir(&self, group_id: &str, app_id: &str) -> PathBuf {
        self.root.join(group_id).join(app_id)
    }

    fn read_record(&self, group_id: &str, app_id: &str) -> AppSyncResult<AppRecord> {
        let path = self.app_dir(group_id, app_id).join(RECORD_FILE);
        if !self.fs.exists(&path) {
            return Err(AppSyncError::NotFound {
                client_id: app_id.to_string(),
            });
        }
        Ok(serde_json::from_str(&self.fs.read_to_string(&path)?)?)
    }

    fn write_record(&self, record: &AppRecord) -> AppSyncResult<()> {
        let path = self
            .app_dir(&record.app.group_id, &record.app.id)
            .join(RECORD_FILE);
        let text = serde_json::to_string_pretty(record)?;
        self.fs.write_atomic(&path, text.as_bytes())
    }

    fn write_config(&self, group_id: &str, app_id: &str, app: &Application) -> AppSyncResult<()> {
        let path = self.app_dir(group_id, app_id).join(CONFIG_FILE);
        self.fs.write_atomic(&path, app.encode()?.as_bytes())
    }

    fn group_ids(&self) -> AppSyncResult<Vec<String>> {
        list_dirs(&self.root)
    }

    fn records_in(&self, group_id: &str) -> AppSyncResult<Vec<AppRecord>> {
        let mut records = Vec::new();
        for app_id in list_dirs(&self.root.join(group_id))? {
            if self
                .fs
                .exists(&self.app_dir(group_id, &app_id).join(RECORD_FILE))
            {
                records.push(self.read_record(group_id, &app_id)?);
            }
        }
        Ok(records)
    }

    fn update_record(
        &self,
        group_id: &str,
        app_id: &str,
        change: impl FnOnce(&mut AppRecord) -> AppSyncResult<()>,
    ) -> AppSyncResult<()> {
        let mut record = self.read_record(group_id, app_id)?;
        change(&mut record)?;
        self.write_record(&record)
    }
}

impl RemoteClient for FsRemoteClient {
    fn find_app_by_client_id(
        &self,
        group_id: Option<&str>,
        client_id: &str,
    ) -> AppSyncResult<RemoteApp> {
        let groups = match group_id {
            Some(group) => vec![group.to_string()],
            None => self.group_ids()?,
        };
        for group in groups {
            if let Some(record) = self
                .records_in(&group)?
                .into_iter()
                .find(|r| r.app.client_id == client_id)
            {
                return Ok(record.app);
            }
        }
        Err(AppSyncError::NotFound {
            client_id: client_id.to_string(),
        })
    }

    fn list_apps(&self, group_id: &str) -> AppSyncResult<Vec<RemoteApp>> {
        Ok(self
            .records_in(group_id)?
            .into_iter()
            .map(|r| r.app)
            .collect())
    }

    fn create_app(
        &self,
        group_id: &str,
        name: &str,
        location: &str,
        deployment_model: &str,
    ) -> AppSyncResult<RemoteApp> {
        check_segment("project id", group_id)?;
        if name.is_empty() {
            return Err(AppSyncError::Validation("app name must not be empty".to_string()));
        }

        let existing = self.list_apps(group_id)?;
        let nonce = Utc::now().timestamp_nanos_opt().unwrap_or_default().to_string();
        let mut attempt = 0u32;
        let (id, client_id) = loop {
            let seed = digest(&[group_id, name, &nonce, &attempt.to_string()]);
            let id = hex(&seed[..12]);
            let client_id = format!("{}-{}", name, client_suffix(&seed[12..17]));
            if !existing
                .iter()
                .any(|a| a.id == id || a.client_id == client_id)
            {
                break (id, client_id);
            }
            attempt += 1;
        };

        let app = RemoteApp {
            group_id: group_id.to_string(),
            id,
            client_id,
            name: name.to_string(),
            location: location.to_string(),
            deployment_model: deployment_model.to_string(),
        };
        let config = Application {
            group_id: app.group_id.clone(),
            name: app.name.clone(),
            id: app.id.clone(),
            client_id: app.client_id.clone(),
            ..Default::default()
        };
        self.write_config(group_id, &app.id, &config)?;
        self.write_record(&AppRecord {
            app: app.clone(),
            ..Default::default()
        })?;
        Ok(app)
    }

    fn export(&self, group_id: &str, app_id: &str) -> AppSyncResult<Application> {
        let path = self.app_dir(group_id, app_id).join(CONFIG_FILE);
        if !self.fs.exists(&path) {
            return Err(AppSyncError::NotFound {
                client_id: app_id.to_string(),
            });
        }
        let (app, _) = Application::decode(&self.fs.read_to_string(&path)?, &path)?;
        Ok(app)
    }

    fn push(
        &self,
        group_id: &str,
        app_id: &str,
        payload: &Application,
        strategy: ImportStrategy,
    ) -> AppSyncResult<()> {
        payload.validate().map_err(AppSyncError::Validation)?;
        let current = self.export(group_id, app_id)?;
        let mut applied = apply_payload(&current, payload, strategy);
        assign_missing_ids(&mut applied);
        self.write_config(group_id, app_id, &applied)?;

        if applied.name != current.name {
            self.update_record(group_id, app_id, |record| {
                record.app.name = applied.name.clone();
                Ok(())
            })?;
        }
        Ok(())
    }

    fn diff(
        &self,
        group_id: &str,
        app_id: &str,
        payload: &Application,
        strategy: ImportStrategy,
    ) -> AppSyncResult<Vec<String>> {
        let current = self.export(group_id, app_id)?;
        Ok(ConfigDiffer::new(strategy).diff(payload, &current).lines())
    }

    fn list_assets(&self, group_id: &str, app_id: &str) -> AppSyncResult<Vec<AssetMetadata>> {
        Ok(self.read_record(group_id, app_id)?.assets)
    }

    fn upload_asset(
        &self,
        group_id: &str,
        app_id: &str,
        asset: &AssetMetadata,
        body: &[u8],
    ) -> AppSyncResult<()> {
        self.fs.write_atomic(
            &self.asset_location(group_id, app_id, &asset.file_path),
            body,
        )?;
        self.update_record(group_id, app_id, |record| {
            let mut stored = asset.clone();
            stored.app_id = app_id.to_string();
            stored.file_size = body.len() as u64;
            record.assets.retain(|a| a.file_path != asset.file_path);
            record.assets.push(stored);
            record.assets.sort_by(|a, b| a.file_path.cmp(&b.file_path));
            Ok(())
        })
    }

    fn set_asset_attributes(
        &self,
        group_id: &str,
        app_id: &str,
        path: &str,
        attrs: &[AssetAttribute],
    ) -> AppSyncResult<()> {
        self.update_record(group_id, app_id, |record| {
            let asset = record
                .assets
                .iter_mut()
                .find(|a| a.file_path == path)
                .ok_or_else(|| {
                    AppSyncError::remote("set asset attributes", format!("no asset at {}", path))
                })?;
            asset.attrs = attrs.to_vec();
            Ok(())
        })
    }

    fn delete_asset(&self, group_id: &str, app_id: &str, path: &str) -> AppSyncResult<()> {
        let location = self.asset_location(group_id, app_id, path);
        if self.fs.exists(&location) {
            self.fs.remove(&location)?;
        }
        self.update_record(group_id, app_id, |record| {
            record.assets.retain(|a| a.file_path != path);
            Ok(())
        })
    }

    fn invalidate_cache(
        &self,
        group_id: &str,
        app_id: &str,
        paths: &[String],
    ) -> AppSyncResult<()> {
        self.update_record(group_id, app_id, |record| {
            record.invalidations.extend(paths.iter().cloned());
            Ok(())
        })
    }
}

fn list_dirs(dir: &Path) -> AppSyncResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Group ids become directory names; refuse anything that is not one segment.
fn check_segment(what: &str, value: &str) -> AppSyncResult<()> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(AppSyncError::Validation(format!(
            "invalid {}: {:?}",
            what, value
        )));
    }
    Ok(())
}

fn digest(parts: &[&str]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.finalize().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn client_suffix(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| CLIENT_ID_ALPHABET[*b as usize % CLIENT_ID_ALPHABET.len()] as char)
        .collect()
}

/// 24-hex identifier for an entity, stable for a given app and entity path
fn entity_id(app_id: &str, path: &str) -> String {
    hex(&digest(&[app_id, path])[..12])
}

fn fill_id(id: &mut String, app_id: &str, path: &str) {
    if id.is_empty() {
        *id = entity_id(app_id, path);
    }
}

fn assign_missing_ids(app: &mut Application) {
    let app_id = app.id.clone();
    for service in &mut app.services {
        let base = format!("services/{}", service.natural_key());
        for hook in &mut service.webhooks {
            let path = format!("{}/webhooks/{}", base, hook.natural_key());
            fill_id(&mut hook.id, &app_id, &path);
        }
        for rule in &mut service.rules {
            let path = format!("{}/rules/{}", base, rule.natural_key());
            fill_id(&mut rule.id, &app_id, &path);
        }
    }
    for pipeline in &mut app.pipelines {
        let path = format!("pipelines/{}", pipeline.natural_key());
        fill_id(&mut pipeline.id, &app_id, &path);
    }
    for provider in &mut app.auth_providers {
        let path = format!("auth_providers/{}", provider.natural_key());
        fill_id(&mut provider.id, &app_id, &path);
    }
}
