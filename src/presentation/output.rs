//! Output Rendering
//!
//! Final result lines for the import and diff commands, as text or JSON.

use crate::application::ImportOutcome;
use crate::config::ConfigWarning;
use crate::error::AppSyncError;
use crate::infrastructure::terminal::{colors, paint, paint_change_line};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Summary of a finished import
pub fn render_outcome(outcome: &ImportOutcome, format: OutputFormat, color: bool) -> String {
    match format {
        OutputFormat::Json => {
            let json = match outcome {
                ImportOutcome::Imported {
                    client_id,
                    created,
                    config_changes,
                    asset_changes,
                } => serde_json::json!({
                    "event": "result",
                    "command": "import",
                    "outcome": "imported",
                    "client_id": client_id,
                    "created": created,
                    "config_changes": config_changes,
                    "asset_changes": asset_changes,
                }),
                ImportOutcome::NoChanges { client_id } => serde_json::json!({
                    "event": "result",
                    "command": "import",
                    "outcome": "no_changes",
                    "client_id": client_id,
                }),
                ImportOutcome::Declined => serde_json::json!({
                    "event": "result",
                    "command": "import",
                    "outcome": "declined",
                }),
            };
            json.to_string()
        }
        OutputFormat::Text => match outcome {
            ImportOutcome::Imported {
                client_id,
                created,
                config_changes,
                asset_changes,
            } => {
                let verb = if *created {
                    "created and imported"
                } else {
                    "imported"
                };
                format!(
                    "{} {} ({}, {})",
                    paint(verb, colors::SUCCESS, color),
                    client_id,
                    plural(*config_changes, "config change"),
                    plural(*asset_changes, "asset change"),
                )
            }
            ImportOutcome::NoChanges { client_id } => {
                format!("{} is already up to date", client_id)
            }
            ImportOutcome::Declined => "import cancelled; nothing was changed".to_string(),
        },
    }
}

/// Result of `appsync diff`
pub fn render_diff(lines: &[String], format: OutputFormat, color: bool) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "event": "result",
            "command": "diff",
            "changes": lines,
        })
        .to_string(),
        OutputFormat::Text if lines.is_empty() => "no changes".to_string(),
        OutputFormat::Text => lines
            .iter()
            .map(|line| paint_change_line(line, color))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_config_warning(warning: &ConfigWarning, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({
            "event": "config_warning",
            "file": warning.file.display().to_string(),
            "key": warning.key,
            "line": warning.line,
            "suggestion": warning.suggestion,
        })
        .to_string(),
        OutputFormat::Text => {
            let mut out = format!(
                "warning: unknown config key {:?} in {}",
                warning.key,
                warning.file.display()
            );
            if let Some(line) = warning.line {
                out.push_str(&format!(" (line {})", line));
            }
            if let Some(suggestion) = &warning.suggestion {
                out.push_str(&format!("; did you mean {:?}?", suggestion));
            }
            out
        }
    }
}

/// Failure message; deployed-but-stale runs get a distinct hint
pub fn render_error(
    command: &str,
    err: &anyhow::Error,
    format: OutputFormat,
    color: bool,
) -> String {
    let deployed = err
        .downcast_ref::<AppSyncError>()
        .is_some_and(AppSyncError::is_post_apply);
    match format {
        OutputFormat::Json => serde_json::json!({
            "event": "error",
            "command": command,
            "message": format!("{:#}", err),
            "deployed": deployed,
        })
        .to_string(),
        OutputFormat::Text => {
            let mut out = format!("{} {:#}", paint("error:", colors::ERROR, color), err);
            if deployed {
                out.push_str(
                    "\nthe app was deployed, but the local directory may be stale; \
                     run `appsync import` again to refresh it",
                );
            }
            out
        }
    }
}
