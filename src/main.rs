//! AppSync CLI - import a local app directory into its deployed app
//!
//! Usage: appsync <COMMAND>
//!
//! Commands:
//!   import  Reconcile the deployed app with the local directory
//!   diff    Preview what an import would change

mod commands;

use std::process::ExitCode;

use clap::Parser;

use appsync::infrastructure::terminal::stderr_supports_color;
use appsync::presentation::output::render_error;
use appsync::presentation::{Cli, Commands, OutputFormat};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    let format = OutputFormat::from_json_flag(cli.json);
    let command = match cli.command {
        Commands::Import { .. } => "import",
        Commands::Diff { .. } => "diff",
    };

    let result =
        commands::Session::load(&cli).and_then(|session| commands::run(&cli, &session));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let rendered = render_error(command, &err, format, stderr_supports_color());
            match format {
                OutputFormat::Json => println!("{}", rendered),
                OutputFormat::Text => eprintln!("{}", rendered),
            }
            ExitCode::FAILURE
        }
    }
}
