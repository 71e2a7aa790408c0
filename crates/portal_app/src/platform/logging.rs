//! Log setup for the terminal client.
//!
//! Rendered output owns stdout, so logs go to `./job_portal.log` unless the
//! user asks for the terminal.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILENAME: &str = "./job_portal.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogDestination {
    /// Write to ./job_portal.log in current directory.
    #[default]
    File,
    /// Write to the terminal, interleaved with the rendered screen.
    Terminal,
    Both,
}

/// Lowest severity that reaches the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    /// Adds stale-response and cancellation notices.
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub fn initialize(destination: LogDestination, level: LogLevel) {
    let loggers = build_loggers(destination, level.into(), Path::new(LOG_FILENAME));
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(log_path) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create log file {log_path:?}: {err}"),
        }
    }
    loggers
}

/// HTTP client internals are too chatty for a per-request log.
fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("rustls")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn level_maps_onto_filter() {
        assert_eq!(LevelFilter::from(LogLevel::default()), LevelFilter::Info);
        assert_eq!(LevelFilter::from(LogLevel::Debug), LevelFilter::Debug);
        assert_eq!(LevelFilter::from(LogLevel::Error), LevelFilter::Error);
    }

    #[test]
    fn destinations_pick_their_loggers() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("portal.log");

        let both = build_loggers(LogDestination::Both, LevelFilter::Debug, &path);
        assert_eq!(both.len(), 2);
        assert!(both.iter().all(|logger| logger.level() == LevelFilter::Debug));
        assert!(path.exists());

        let terminal = build_loggers(LogDestination::Terminal, LevelFilter::Warn, &path);
        assert_eq!(terminal.len(), 1);
    }

    #[test]
    fn unwritable_log_file_drops_only_the_file_logger() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir").join("portal.log");

        assert!(build_loggers(LogDestination::File, LevelFilter::Info, &path).is_empty());
        assert_eq!(
            build_loggers(LogDestination::Both, LevelFilter::Info, &path).len(),
            1
        );
    }
}
