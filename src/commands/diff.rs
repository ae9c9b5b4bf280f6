use std::path::Path;

use anyhow::Result;

use appsync::application::ImportOptions;
use appsync::infrastructure::terminal::stdout_supports_color;
use appsync::presentation::create_import_use_case;
use appsync::presentation::output::render_diff;
use appsync::ImportStrategy;

use super::Session;

/// Print what `appsync import` would change in the deployed configuration
pub fn cmd_diff(
    session: &Session,
    path: Option<&Path>,
    strategy: Option<ImportStrategy>,
) -> Result<()> {
    let app_dir = session.app_dir(path)?;
    let options = ImportOptions::new(&app_dir)
        .with_strategy(strategy.unwrap_or(session.config.import.strategy));

    let use_case = create_import_use_case(&session.remote_root());
    let events = session.event_sink();
    let lines = use_case.preview(&options, events.as_ref())?;

    println!(
        "{}",
        render_diff(&lines, session.format, stdout_supports_color())
    );
    Ok(())
}
