//! Configuration module for AppSync
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (APPSYNC_*)
//! 3. `--config <path>`, else `./appsync.toml`, else the user config
//!    (`<config_dir>/appsync/config.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load, load_with_warnings, locate, with_env_overrides, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{Config, HostingConfig, ImportConfig, OutputConfig, RemoteConfig, Verbosity};
