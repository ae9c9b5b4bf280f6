//! Prompter Port
//!
//! Interactive questions asked during an import: whether to create a missing
//! app, its name/project/location, and the final go-ahead for a diff.

use crate::error::AppSyncResult;

pub trait Prompter {
    /// Yes/no question
    fn confirm(&self, prompt: &str) -> AppSyncResult<bool>;

    /// Free-text answer, `default` used when the answer is empty
    fn input(&self, prompt: &str, default: &str) -> AppSyncResult<String>;

    /// One of `options`
    fn select(&self, prompt: &str, default: &str, options: &[&str]) -> AppSyncResult<String>;

    /// Show the pending changes before asking for confirmation
    fn show_diff(&self, lines: &[String]);
}
