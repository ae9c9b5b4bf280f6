//! Import Use Case
//!
//! Drives one import run through its states:
//!
//! `ResolveTarget → {CreateNew | UseExisting} → PrepareAssets? → ComputeDiff →
//! Confirm → Apply → ApplyAssets? → ReSync → Done`
//!
//! Every remote and filesystem touch goes through a port, so the whole run
//! is testable with in-memory doubles. Once `Apply` is entered there is no
//! way back; only `ReSync` failures are reported as `SyncFailure`.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{Application, AssetCache, InstanceData};
use crate::domain::ports::{
    AssetCacheRepository, DeclarationStore, HostingSource, ImportEvent, ImportEventSink,
    ImportStage, NoopEventSink, Prompter, RemoteApp, RemoteClient,
};
use crate::domain::services::{AssetDiffer, AssetPlan, ConfigDiffer};
use crate::domain::value_objects::ImportStrategy;
use crate::error::{AppSyncError, AppSyncResult};

use super::options::ImportOptions;
use super::result::ImportOutcome;

/// Locations offered when creating an app
pub const LOCATION_OPTIONS: [&str; 4] = ["US-VA", "US-OR", "IE", "AU"];
/// Deployment models offered when creating an app
pub const DEPLOYMENT_MODEL_OPTIONS: [&str; 2] = ["GLOBAL", "LOCAL"];

const NO_APP_YET: &str = "this app does not exist yet";

enum Transition {
    Next(ImportStage),
    Finish(ImportOutcome),
}

/// State carried from one stage to the next
struct ImportRun {
    instance: InstanceData,
    local: Application,
    strategy: ImportStrategy,
    target: RemoteApp,
    missing_reason: String,
    created: bool,
    skip_diff: bool,
    assets: Option<AssetPlan>,
    payload: Application,
    lines: Vec<String>,
    config_changes: usize,
}

impl ImportRun {
    fn asset_changes(&self) -> usize {
        self.assets.as_ref().map_or(0, AssetPlan::change_count)
    }
}

/// Import use case - reconciles a local app directory with its deployed app
pub struct ImportUseCase<RC, DS, HS, CR>
where
    RC: RemoteClient,
    DS: DeclarationStore,
    HS: HostingSource,
    CR: AssetCacheRepository,
{
    remote: RC,
    store: DS,
    hosting: HS,
    cache_repo: CR,
    prompter: Arc<dyn Prompter>,
}

impl<RC, DS, HS, CR> ImportUseCase<RC, DS, HS, CR>
where
    RC: RemoteClient,
    DS: DeclarationStore,
    HS: HostingSource,
    CR: AssetCacheRepository,
{
    pub fn new(
        remote: RC,
        store: DS,
        hosting: HS,
        cache_repo: CR,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            remote,
            store,
            hosting,
            cache_repo,
            prompter,
        }
    }

    /// Execute the import silently
    pub fn execute(&self, options: &ImportOptions) -> AppSyncResult<ImportOutcome> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the import, reporting progress to `events`
    pub fn execute_with_events(
        &self,
        options: &ImportOptions,
        events: Arc<dyn ImportEventSink>,
    ) -> AppSyncResult<ImportOutcome> {
        let events = events.as_ref();
        let mut run = self.load(options, events)?;
        let mut stage = ImportStage::ResolveTarget;
        let detailed = events.wants_detailed_events();

        loop {
            if detailed {
                events.on_event(ImportEvent::StageEntered { stage });
            }
            let transition = match stage {
                ImportStage::ResolveTarget => self.resolve_target(options, &mut run)?,
                ImportStage::CreateNew => self.create_new(options, &mut run, events)?,
                ImportStage::UseExisting => Transition::Next(after_target(options)),
                ImportStage::PrepareAssets => self.prepare_assets(options, &mut run, events)?,
                ImportStage::ComputeDiff => self.compute_diff(options, &mut run, events)?,
                ImportStage::Confirm => self.confirm(options, &run)?,
                ImportStage::Apply => self.apply(&run, events)?,
                ImportStage::ApplyAssets => self.apply_assets(options, &run, events)?,
                ImportStage::ReSync => self.resync(options, &mut run, events)?,
                ImportStage::Done => {
                    events.on_event(ImportEvent::Completed {
                        client_id: run.target.client_id.clone(),
                    });
                    Transition::Finish(ImportOutcome::Imported {
                        client_id: run.target.client_id.clone(),
                        created: run.created,
                        config_changes: run.config_changes,
                        asset_changes: run.asset_changes(),
                    })
                }
            };

            match transition {
                Transition::Next(next) => stage = next,
                Transition::Finish(outcome) => return Ok(outcome),
            }
        }
    }

    /// Ask the remote what an import would change, without changing anything
    pub fn preview(
        &self,
        options: &ImportOptions,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Vec<String>> {
        let run = self.load(options, events)?;
        if run.instance.client_id.is_empty() {
            return Err(AppSyncError::Validation(format!(
                "{}; run `appsync import` to create it",
                NO_APP_YET
            )));
        }
        let target = self
            .remote
            .find_app_by_client_id(options.group_id.as_deref(), &run.instance.client_id)?;
        self.remote
            .diff(&target.group_id, &target.id, &run.local, options.strategy)
            .map_err(|e| AppSyncError::remote("diff app with currently deployed instance", e))
    }

    /// Read instance data and the declaration; nothing remote happens before this succeeds.
    fn load(
        &self,
        options: &ImportOptions,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<ImportRun> {
        let mut instance = self
            .store
            .load_instance_data(&options.app_dir)?
            .unwrap_or_default();
        if let Some(client_id) = options.client_id.as_deref().filter(|id| !id.is_empty()) {
            instance.client_id = client_id.to_string();
        }

        let loaded = self.store.load_application(&options.app_dir)?;
        for warning in loaded.warnings {
            events.on_event(ImportEvent::DeclarationWarning {
                file: warning.file,
                key: warning.key,
            });
        }

        Ok(ImportRun {
            instance,
            local: loaded.application,
            strategy: options.strategy,
            target: RemoteApp::default(),
            missing_reason: String::new(),
            created: false,
            skip_diff: false,
            assets: None,
            payload: Application::default(),
            lines: Vec::new(),
            config_changes: 0,
        })
    }

    fn resolve_target(
        &self,
        options: &ImportOptions,
        run: &mut ImportRun,
    ) -> AppSyncResult<Transition> {
        if run.instance.client_id.is_empty() {
            run.missing_reason = NO_APP_YET.to_string();
            return Ok(Transition::Next(ImportStage::CreateNew));
        }

        match self
            .remote
            .find_app_by_client_id(options.group_id.as_deref(), &run.instance.client_id)
        {
            Ok(app) => {
                run.target = app;
                Ok(Transition::Next(ImportStage::UseExisting))
            }
            Err(err) if err.is_not_found() => {
                run.missing_reason = err.to_string();
                Ok(Transition::Next(ImportStage::CreateNew))
            }
            Err(err) => Err(AppSyncError::remote("fetch app", err)),
        }
    }

    fn create_new(
        &self,
        options: &ImportOptions,
        run: &mut ImportRun,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Transition> {
        // A fresh app has nothing to preserve or diff against.
        run.strategy = ImportStrategy::Replace;
        run.skip_diff = true;

        let question = format!("{}: would you like to create a new app?", run.missing_reason);
        if !self.ask_yes_no(options, &question)? {
            return Ok(Transition::Finish(ImportOutcome::Declined));
        }

        let default_name = [
            options.app_name.as_deref().unwrap_or_default(),
            run.instance.name.as_str(),
            run.local.name.as_str(),
        ]
        .into_iter()
        .find(|name| !name.is_empty())
        .unwrap_or_default()
        .to_string();
        let name = self.ask(options, "App name", &default_name)?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppSyncError::Validation("an app name is required".to_string()));
        }

        let group_id = self.resolve_group(options)?;
        let existing = self
            .remote
            .list_apps(&group_id)
            .map_err(|e| AppSyncError::remote("list apps", e))?;
        if existing.iter().any(|app| app.name == name) {
            return Err(AppSyncError::Validation(format!(
                "app already exists with name {:?}",
                name
            )));
        }

        let location = self.choose(
            options,
            "Location",
            run.instance.location.as_deref().unwrap_or_default(),
            &LOCATION_OPTIONS,
        )?;
        let deployment_model = self.choose(
            options,
            "Deployment Model",
            run.instance.deployment_model.as_deref().unwrap_or_default(),
            &DEPLOYMENT_MODEL_OPTIONS,
        )?;

        let app = self
            .remote
            .create_app(&group_id, &name, &location, &deployment_model)
            .map_err(|e| AppSyncError::remote_apply("create app", e))?;
        events.on_event(ImportEvent::AppCreated {
            client_id: app.client_id.clone(),
        });

        run.instance.client_id = app.client_id.clone();
        run.instance.name = app.name.clone();
        run.instance.location = Some(location);
        run.instance.deployment_model = Some(deployment_model);
        self.store
            .write_instance_data(&options.app_dir, &run.instance)
            .map_err(|e| AppSyncError::sync_failure("creation", e))?;

        // The name chosen at creation wins over the one in the declaration.
        run.local.name = app.name.clone();
        run.target = app;
        run.created = true;
        Ok(Transition::Next(after_target(options)))
    }

    fn resolve_group(&self, options: &ImportOptions) -> AppSyncResult<String> {
        if let Some(group) = options.group_id.as_deref().filter(|g| !g.is_empty()) {
            return Ok(group.to_string());
        }
        let default = options.default_group.as_deref().unwrap_or_default();
        let group = self.ask(options, "Project ID", default)?;
        let group = group.trim();
        if group.is_empty() {
            return Err(AppSyncError::Validation(
                "no project selected; pass --project-id or set remote.default_group".to_string(),
            ));
        }
        Ok(group.to_string())
    }

    fn prepare_assets(
        &self,
        options: &ImportOptions,
        run: &mut ImportRun,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Transition> {
        let root = options.hosting_root();
        let descriptions = self.hosting.load_descriptions(&options.metadata_path())?;
        let mut cache = self.load_cache(options, events);

        let scan = self
            .hosting
            .scan(&run.target.id, &root, &descriptions, &mut cache)?;
        events.on_event(ImportEvent::AssetsScanned {
            total: scan.assets.len(),
            rehashed: scan.rehashed,
        });

        let present: BTreeSet<String> = scan.assets.iter().map(|a| a.file_path.clone()).collect();
        cache.prune(&present);

        // Persist hashing progress now, whatever happens later in the run.
        if cache.needs_save() {
            match self.cache_repo.save(&cache, &options.cache_path) {
                Ok(()) => {
                    cache.mark_clean();
                    events.on_event(ImportEvent::CacheSaved {
                        path: options.cache_path.clone(),
                        entries: cache.len(),
                    });
                }
                Err(err) => events.on_event(ImportEvent::CacheWriteFailed {
                    error: err.to_string(),
                }),
            }
        }

        let deployed = self
            .remote
            .list_assets(&run.target.group_id, &run.target.id)
            .map_err(|e| AppSyncError::remote("retrieve remote assets", e))?;
        run.assets = Some(AssetDiffer::diff(&scan.assets, &deployed, run.strategy));
        Ok(Transition::Next(ImportStage::ComputeDiff))
    }

    fn load_cache(&self, options: &ImportOptions, events: &dyn ImportEventSink) -> AssetCache {
        if options.reset_cache {
            let mut cache = AssetCache::new();
            cache.mark_dirty();
            return cache;
        }
        match self.cache_repo.load(&options.cache_path) {
            Ok(cache) => cache,
            Err(err) => {
                events.on_event(ImportEvent::CacheLoadFailed {
                    error: err.to_string(),
                });
                AssetCache::new()
            }
        }
    }

    fn compute_diff(
        &self,
        options: &ImportOptions,
        run: &mut ImportRun,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Transition> {
        if run.skip_diff {
            run.payload = run.local.clone();
            run.config_changes = run.local.entity_count();
        } else {
            let deployed = self
                .remote
                .export(&run.target.group_id, &run.target.id)
                .map_err(|e| AppSyncError::remote("diff app with currently deployed instance", e))?;
            let diff = ConfigDiffer::new(run.strategy).diff(&run.local, &deployed);
            run.lines = if options.verbose {
                diff.render_detailed().lines().map(str::to_string).collect()
            } else {
                diff.lines()
            };
            run.config_changes = diff.changes().len();
            run.payload = diff.into_payload();
        }

        if let Some(plan) = &run.assets {
            run.lines.extend(plan.lines());
        }

        events.on_event(ImportEvent::DiffComputed {
            config_changes: run.config_changes,
            asset_changes: run.asset_changes(),
        });
        Ok(Transition::Next(ImportStage::Confirm))
    }

    fn confirm(&self, options: &ImportOptions, run: &ImportRun) -> AppSyncResult<Transition> {
        if options.assume_yes || run.skip_diff {
            return Ok(Transition::Next(ImportStage::Apply));
        }
        if run.lines.is_empty() {
            return Ok(Transition::Finish(ImportOutcome::NoChanges {
                client_id: run.target.client_id.clone(),
            }));
        }

        self.prompter.show_diff(&run.lines);
        if !self
            .prompter
            .confirm("Please confirm the changes shown above")?
        {
            return Ok(Transition::Finish(ImportOutcome::Declined));
        }
        Ok(Transition::Next(ImportStage::Apply))
    }

    fn apply(&self, run: &ImportRun, events: &dyn ImportEventSink) -> AppSyncResult<Transition> {
        self.remote
            .push(&run.target.group_id, &run.target.id, &run.payload, run.strategy)
            .map_err(|e| AppSyncError::remote_apply("import app", e))?;
        events.on_event(ImportEvent::ConfigPushed {
            strategy: run.strategy.to_string(),
        });

        if run.assets.is_some() {
            Ok(Transition::Next(ImportStage::ApplyAssets))
        } else {
            Ok(Transition::Next(ImportStage::ReSync))
        }
    }

    /// Uploads first, then attribute changes, then deletes, so nothing that
    /// stays is ever missing while the run is in flight.
    fn apply_assets(
        &self,
        options: &ImportOptions,
        run: &ImportRun,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Transition> {
        let Some(plan) = &run.assets else {
            return Ok(Transition::Next(ImportStage::ReSync));
        };
        let group_id = run.target.group_id.as_str();
        let app_id = run.target.id.as_str();
        let root = options.hosting_root();

        for op in plan.uploads() {
            let Some(local) = &op.local else {
                continue;
            };
            let operation = format!("upload {}", op.path);
            let body = self
                .hosting
                .read_asset(&root, &op.path)
                .map_err(|e| AppSyncError::remote_apply(&operation, e))?;
            self.remote
                .upload_asset(group_id, app_id, local, &body)
                .map_err(|e| AppSyncError::remote_apply(&operation, e))?;
            events.on_event(ImportEvent::AssetUploaded {
                path: op.path.clone(),
            });
        }

        for op in plan.attribute_updates() {
            let Some(local) = &op.local else {
                continue;
            };
            self.remote
                .set_asset_attributes(group_id, app_id, &op.path, &local.attrs)
                .map_err(|e| {
                    AppSyncError::remote_apply(format!("update attributes of {}", op.path), e)
                })?;
            events.on_event(ImportEvent::AssetAttributesUpdated {
                path: op.path.clone(),
            });
        }

        for op in plan.deletes() {
            self.remote
                .delete_asset(group_id, app_id, &op.path)
                .map_err(|e| AppSyncError::remote_apply(format!("delete {}", op.path), e))?;
            events.on_event(ImportEvent::AssetDeleted {
                path: op.path.clone(),
            });
        }

        if options.reset_cdn_cache {
            let paths = plan.changed_paths();
            if !paths.is_empty() {
                self.remote
                    .invalidate_cache(group_id, app_id, &paths)
                    .map_err(|e| AppSyncError::remote_apply("invalidate cdn cache", e))?;
                events.on_event(ImportEvent::CdnInvalidated { count: paths.len() });
            }
        }

        Ok(Transition::Next(ImportStage::ReSync))
    }

    fn resync(
        &self,
        options: &ImportOptions,
        run: &mut ImportRun,
        events: &dyn ImportEventSink,
    ) -> AppSyncResult<Transition> {
        let deployed = self
            .remote
            .export(&run.target.group_id, &run.target.id)
            .map_err(|e| AppSyncError::sync_failure("import", e))?;
        self.store
            .write_application(&options.app_dir, &deployed)
            .map_err(|e| AppSyncError::sync_failure("import", e))?;

        run.instance.client_id = run.target.client_id.clone();
        if !deployed.name.is_empty() {
            run.instance.name = deployed.name.clone();
        }
        self.store
            .write_instance_data(&options.app_dir, &run.instance)
            .map_err(|e| AppSyncError::sync_failure("import", e))?;

        events.on_event(ImportEvent::Synced {
            dir: options.app_dir.clone(),
        });
        Ok(Transition::Next(ImportStage::Done))
    }

    fn ask_yes_no(&self, options: &ImportOptions, prompt: &str) -> AppSyncResult<bool> {
        if options.assume_yes {
            return Ok(true);
        }
        self.prompter.confirm(prompt)
    }

    fn ask(&self, options: &ImportOptions, prompt: &str, default: &str) -> AppSyncResult<String> {
        if options.assume_yes {
            return Ok(default.to_string());
        }
        self.prompter.input(prompt, default)
    }

    /// One of `choices`; an unknown default falls back to the first choice.
    fn choose(
        &self,
        options: &ImportOptions,
        prompt: &str,
        default: &str,
        choices: &[&str],
    ) -> AppSyncResult<String> {
        let default = if choices.contains(&default) {
            default
        } else {
            choices.first().copied().unwrap_or_default()
        };
        if options.assume_yes {
            return Ok(default.to_string());
        }

        let answer = self.prompter.select(prompt, default, choices)?;
        if !choices.contains(&answer.as_str()) {
            return Err(AppSyncError::Validation(format!(
                "{:?} is not one of [{}]",
                answer,
                choices.join("|")
            )));
        }
        Ok(answer)
    }
}

fn after_target(options: &ImportOptions) -> ImportStage {
    if options.include_hosting {
        ImportStage::PrepareAssets
    } else {
        ImportStage::ComputeDiff
    }
}
