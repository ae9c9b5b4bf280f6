//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Usage
//!
//! ```ignore
//! use appsync::presentation::factory;
//!
//! let use_case = factory::create_import_use_case(&remote_root);
//! let outcome = use_case.execute(&options)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands};
pub use factory::{create_import_use_case, create_import_use_case_with_prompter};
pub use output::OutputFormat;
