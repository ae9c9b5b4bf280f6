//! Common test utilities for AppSync scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated app directory and file-backed remote, plus helpers
//!   to run the `appsync` binary or the import use case directly
//! - `ScriptedPrompter`: Answers prompts from a queue and records questions
//! - Fixtures: Reusable declaration content

pub mod env;
pub mod fixtures;
pub mod prompter;

pub use env::*;
pub use fixtures::*;
pub use prompter::*;
