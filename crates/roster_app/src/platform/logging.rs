//! Platform logging initialization for roster_app.
//!
//! File output goes to `./roster.log` in the current working directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use thiserror::Error;

const LOG_FILE: &str = "./roster.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Write to ./roster.log in current directory.
    File,
    /// Write to terminal (stdout).
    #[default]
    Terminal,
    /// Write to both file and terminal.
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

#[derive(Debug, Error)]
#[error("could not create log file {path:?}: {source}")]
pub struct LoggingError {
    path: PathBuf,
    source: io::Error,
}

/// Installs the global logger. A log file that cannot be created is an error;
/// an already installed logger is left in place.
pub fn initialize(destination: LogDestination, level: LevelFilter) -> Result<(), LoggingError> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        loggers.push(file_logger(level, config, Path::new(LOG_FILE))?);
    }

    let _ = CombinedLogger::init(loggers);
    Ok(())
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Result<Box<WriteLogger<File>>, LoggingError> {
    let file = File::create(path).map_err(|source| LoggingError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteLogger::new(level, config, file))
}
