//! Command entry points for the `appsync` binary

mod diff;
mod import;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use appsync::config::{self, Config, Verbosity};
use appsync::domain::ports::ImportEventSink;
use appsync::infrastructure::{resolve_app_dir, ConsoleEventSink, JsonEventSink};
use appsync::presentation::output::render_config_warning;
use appsync::presentation::{Cli, Commands, OutputFormat};

pub use diff::cmd_diff;
pub use import::{cmd_import, ImportFlags};

/// Process-wide state resolved once per invocation
pub struct Session {
    pub cwd: PathBuf,
    pub config: Config,
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

impl Session {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        let format = OutputFormat::from_json_flag(cli.json);
        let (config, warnings) = config::load(cli.config.as_deref(), &cwd)?;
        for warning in &warnings {
            match format {
                OutputFormat::Json => println!("{}", render_config_warning(warning, format)),
                OutputFormat::Text => eprintln!("{}", render_config_warning(warning, format)),
            }
        }
        let verbosity = if cli.verbose > 0 {
            Verbosity::Verbose
        } else {
            config.output.verbosity
        };
        Ok(Self {
            cwd,
            config,
            format,
            verbosity,
        })
    }

    pub fn app_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        Ok(resolve_app_dir(explicit, &self.cwd)?)
    }

    pub fn remote_root(&self) -> PathBuf {
        self.config.remote.root_or_default()
    }

    pub fn event_sink(&self) -> Arc<dyn ImportEventSink> {
        match self.format {
            OutputFormat::Json => Arc::new(JsonEventSink::stdout()),
            OutputFormat::Text => Arc::new(ConsoleEventSink::stderr(self.verbosity)),
        }
    }
}

/// Dispatch the parsed command line
pub fn run(cli: &Cli, session: &Session) -> Result<()> {
    match &cli.command {
        Commands::Import {
            app_id,
            path,
            project_id,
            app_name,
            strategy,
            include_hosting,
            reset_cdn_cache,
            reset_cache,
            yes,
        } => cmd_import(
            session,
            ImportFlags {
                app_id: app_id.clone(),
                path: path.clone(),
                project_id: project_id.clone(),
                app_name: app_name.clone(),
                strategy: *strategy,
                include_hosting: *include_hosting,
                reset_cdn_cache: *reset_cdn_cache,
                reset_cache: *reset_cache,
                yes: *yes,
            },
        ),
        Commands::Diff { path, strategy } => cmd_diff(session, path.as_deref(), *strategy),
    }
}
