//! Terminal prompter backed by dialoguer

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::domain::ports::Prompter;
use crate::error::{AppSyncError, AppSyncResult};
use crate::infrastructure::terminal::{paint_change_line, stderr_supports_color};

/// Asks questions on the controlling terminal
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    color: bool,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            color: stderr_supports_color(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(err: dialoguer::Error) -> AppSyncError {
    AppSyncError::Prompt(err.to_string())
}

/// Index of `default` in `options`, falling back to the first option
fn default_index(default: &str, options: &[&str]) -> usize {
    options.iter().position(|o| *o == default).unwrap_or(0)
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> AppSyncResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str, default: &str) -> AppSyncResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        let answer = input.interact_text().map_err(prompt_error)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        })
    }

    fn select(&self, prompt: &str, default: &str, options: &[&str]) -> AppSyncResult<String> {
        if options.is_empty() {
            return Ok(default.to_string());
        }
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .default(default_index(default, options))
            .interact()
            .map_err(prompt_error)?;
        Ok(options[index].to_string())
    }

    fn show_diff(&self, lines: &[String]) {
        for line in lines {
            eprintln!("{}", paint_change_line(line, self.color));
        }
    }
}
