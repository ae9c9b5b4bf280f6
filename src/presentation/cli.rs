use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::ImportStrategy;

/// AppSync - import a local app directory into its deployed app
#[derive(Parser, Debug)]
#[command(name = "appsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Show stage transitions, per-file progress and entity line diffs
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./appsync.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reconcile the deployed app with the local directory
    Import {
        /// Client-facing app id (overrides instance data)
        #[arg(long = "app-id", value_name = "ID")]
        app_id: Option<String>,

        /// App directory (default: nearest directory with instance data)
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// Project to look up and create apps in
        #[arg(long = "project-id", value_name = "GROUP")]
        project_id: Option<String>,

        /// Name for a newly created app
        #[arg(long = "app-name", value_name = "NAME")]
        app_name: Option<String>,

        /// How remote-only entities are treated [merge|replace]
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<ImportStrategy>,

        /// Sync static hosting files too
        #[arg(long)]
        include_hosting: bool,

        /// Invalidate edge caches for changed hosting files
        #[arg(long, requires = "include_hosting")]
        reset_cdn_cache: bool,

        /// Ignore the local asset hash cache and rebuild it
        #[arg(long)]
        reset_cache: bool,

        /// Answer every prompt with its default
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Preview what an import would change, without changing anything
    Diff {
        /// App directory (default: nearest directory with instance data)
        #[arg(long, value_name = "DIR")]
        path: Option<PathBuf>,

        /// How remote-only entities are treated [merge|replace]
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<ImportStrategy>,
    },
}
