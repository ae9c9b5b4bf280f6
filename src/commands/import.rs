use std::path::PathBuf;

use anyhow::Result;

use appsync::application::ImportOptions;
use appsync::config::Verbosity;
use appsync::infrastructure::terminal::stderr_supports_color;
use appsync::presentation::create_import_use_case;
use appsync::presentation::output::render_outcome;
use appsync::presentation::OutputFormat;
use appsync::ImportStrategy;

use super::Session;

/// Flags of `appsync import`
#[derive(Debug, Clone, Default)]
pub struct ImportFlags {
    pub app_id: Option<String>,
    pub path: Option<PathBuf>,
    pub project_id: Option<String>,
    pub app_name: Option<String>,
    pub strategy: Option<ImportStrategy>,
    pub include_hosting: bool,
    pub reset_cdn_cache: bool,
    pub reset_cache: bool,
    pub yes: bool,
}

pub fn cmd_import(session: &Session, flags: ImportFlags) -> Result<()> {
    let app_dir = session.app_dir(flags.path.as_deref())?;
    let hosting = &session.config.hosting;

    let mut options = ImportOptions::new(&app_dir)
        .with_strategy(flags.strategy.unwrap_or(session.config.import.strategy))
        .with_hosting(flags.include_hosting)
        .with_files_dir(&hosting.files_dir)
        .with_metadata_file(&hosting.metadata_file)
        .with_reset_cache(flags.reset_cache)
        .with_reset_cdn_cache(flags.reset_cdn_cache)
        .with_assume_yes(flags.yes)
        .with_verbose(session.verbosity >= Verbosity::Verbose);
    if let Some(cache_path) = &hosting.cache_path {
        options = options.with_cache_path(app_dir.join(cache_path));
    }
    if let Some(client_id) = flags.app_id {
        options = options.with_client_id(client_id);
    }
    if let Some(name) = flags.app_name {
        options = options.with_app_name(name);
    }
    if let Some(group) = flags.project_id {
        options = options.with_group_id(group);
    }
    if let Some(group) = &session.config.remote.default_group {
        options = options.with_default_group(group);
    }

    let use_case = create_import_use_case(&session.remote_root());
    let outcome = use_case.execute_with_events(&options, session.event_sink())?;

    let rendered = render_outcome(&outcome, session.format, stderr_supports_color());
    match session.format {
        OutputFormat::Json => println!("{}", rendered),
        OutputFormat::Text if session.verbosity > Verbosity::Quiet => eprintln!("{}", rendered),
        OutputFormat::Text => {}
    }
    Ok(())
}
