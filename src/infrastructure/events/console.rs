//! Console Event Sink
//!
//! Human-readable progress on stderr. Warnings are always shown; progress
//! lines depend on the configured verbosity.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::config::Verbosity;
use crate::domain::ports::{ImportEvent, ImportEventSink};
use crate::infrastructure::terminal::{colors, paint, stderr_supports_color};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbosity: Verbosity,
    color: bool,
}

impl ConsoleEventSink {
    pub fn stderr(verbosity: Verbosity) -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stderr())),
            verbosity,
            color: stderr_supports_color(),
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbosity: Verbosity) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbosity,
            color: false,
        }
    }

    fn write_line(&self, line: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn warn(&self, message: String) {
        self.write_line(format!(
            "{} {}",
            paint("warning:", colors::WARNING, self.color),
            message
        ));
    }

    fn progress(&self, level: Verbosity, message: String) {
        if self.verbosity >= level {
            self.write_line(message);
        }
    }
}

impl ImportEventSink for ConsoleEventSink {
    fn on_event(&self, event: ImportEvent) {
        match event {
            ImportEvent::DeclarationWarning { file, key } => {
                self.warn(format!("ignoring unknown key {} in {}", key, file.display()))
            }
            ImportEvent::CacheLoadFailed { error } => {
                self.warn(format!("asset cache unreadable, rehashing all files: {}", error))
            }
            ImportEvent::CacheWriteFailed { error } => {
                self.warn(format!("could not save asset cache: {}", error))
            }

            ImportEvent::AppCreated { client_id } => self.progress(
                Verbosity::Normal,
                format!(
                    "{} {}",
                    paint("created app", colors::SUCCESS, self.color),
                    client_id
                ),
            ),
            ImportEvent::ConfigPushed { strategy } => self.progress(
                Verbosity::Normal,
                format!("pushed configuration ({})", strategy),
            ),
            ImportEvent::CdnInvalidated { count } => self.progress(
                Verbosity::Normal,
                format!("invalidated {} cached path(s)", count),
            ),
            ImportEvent::Synced { dir } => self.progress(
                Verbosity::Normal,
                format!("synced {}", dir.display()),
            ),
            ImportEvent::Completed { client_id } => self.progress(
                Verbosity::Normal,
                format!(
                    "{} {}",
                    paint("imported", colors::SUCCESS, self.color),
                    client_id
                ),
            ),

            ImportEvent::StageEntered { stage } => self.progress(
                Verbosity::Verbose,
                paint(&format!("-> {}", stage), colors::DIM, self.color),
            ),
            ImportEvent::AssetsScanned { total, rehashed } => self.progress(
                Verbosity::Verbose,
                format!("scanned {} hosting file(s), {} rehashed", total, rehashed),
            ),
            ImportEvent::CacheSaved { path, entries } => self.progress(
                Verbosity::Verbose,
                format!("saved {} cache entries to {}", entries, path.display()),
            ),
            ImportEvent::DiffComputed {
                config_changes,
                asset_changes,
            } => self.progress(
                Verbosity::Verbose,
                format!(
                    "{} config change(s), {} asset change(s)",
                    config_changes, asset_changes
                ),
            ),
            ImportEvent::AssetUploaded { path } => self.progress(
                Verbosity::Verbose,
                paint(&format!("+ {}", path), colors::SUCCESS, self.color),
            ),
            ImportEvent::AssetAttributesUpdated { path } => self.progress(
                Verbosity::Verbose,
                paint(&format!("~ {}", path), colors::WARNING, self.color),
            ),
            ImportEvent::AssetDeleted { path } => self.progress(
                Verbosity::Verbose,
                paint(&format!("- {}", path), colors::ERROR, self.color),
            ),
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}
