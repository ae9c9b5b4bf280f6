//! Import Module
//!
//! Orchestrates importing a local app directory into its deployed app.
//!
//! ## Structure
//!
//! - `options` - Run configuration (`ImportOptions`)
//! - `result` - How a run ended (`ImportOutcome`)
//! - `use_case` - The import state machine (`ImportUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use appsync::application::import::{ImportOptions, ImportUseCase};
//!
//! let use_case = ImportUseCase::new(remote, store, hosting, cache_repo, prompter);
//! let outcome = use_case.execute(&ImportOptions::new(app_dir))?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::{ImportOptions, DEFAULT_FILES_DIR, DEFAULT_METADATA_FILE};
pub use result::ImportOutcome;
pub use use_case::{ImportUseCase, DEPLOYMENT_MODEL_OPTIONS, LOCATION_OPTIONS};
