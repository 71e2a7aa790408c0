use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use portal_engine::ApiSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::logging::{LogDestination, LogLevel};

pub const DEFAULT_CONFIG_FILENAME: &str = "job_portal.ron";

#[derive(Debug, Parser)]
#[command(name = "portal_app", about = "Terminal client for the job posts service")]
pub struct Cli {
    /// RON configuration file; a missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILENAME)]
    pub config: PathBuf,
    /// Backend base address, overriding the configuration file.
    #[arg(long)]
    pub api_url: Option<String>,
    /// Where log output goes, overriding the configuration file.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
    /// Lowest log severity recorded, overriding the configuration file.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            api_base_url: api.base_url,
            connect_timeout_ms: api.connect_timeout.as_millis() as u64,
            request_timeout_ms: api.request_timeout.as_millis() as u64,
            max_response_bytes: api.max_bytes,
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    /// Reads a configuration file. `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Combines the file (if any) with command-line overrides and validates the result.
    pub fn resolve(cli: &Cli) -> Result<(Self, bool), ConfigError> {
        let from_file = Self::load(&cli.config)?;
        let loaded = from_file.is_some();
        let mut config = from_file.unwrap_or_default();
        if let Some(url) = &cli.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(destination) = cli.log {
            config.log_destination = destination;
        }
        if let Some(level) = cli.log_level {
            config.log_level = level;
        }
        config.validate()?;
        Ok((config, loaded))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.api_base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_base_url).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        Ok(())
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn cli(config: PathBuf) -> Cli {
        Cli {
            config,
            api_url: None,
            log: None,
            log_level: None,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, loaded) = AppConfig::resolve(&cli(temp.path().join("absent.ron"))).unwrap();
        assert!(!loaded);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8080");
    }

    #[test]
    fn partial_file_fills_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("job_portal.ron");
        fs::write(
            &path,
            "(api_base_url: \"http://jobs.internal:9000\", log_destination: Both, log_level: Debug)",
        )
        .unwrap();

        let (config, loaded) = AppConfig::resolve(&cli(path)).unwrap();
        assert!(loaded);
        assert_eq!(config.api_base_url, "http://jobs.internal:9000");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.request_timeout_ms, 30_000);

        let settings = config.api_settings();
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.max_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn command_line_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("job_portal.ron");
        fs::write(&path, "(api_base_url: \"http://from-file:1\")").unwrap();

        let mut args = cli(path);
        args.api_url = Some("https://from-cli.example.com".to_string());
        args.log = Some(LogDestination::Terminal);
        args.log_level = Some(LogLevel::Trace);

        let (config, _) = AppConfig::resolve(&args).unwrap();
        assert_eq!(config.api_base_url, "https://from-cli.example.com");
        assert_eq!(config.log_destination, LogDestination::Terminal);
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("job_portal.ron");
        fs::write(&path, "(api_base_url: 42").unwrap();

        let err = AppConfig::resolve(&cli(path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = AppConfig {
            api_base_url: "ftp://jobs.example.com".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));

        let config = AppConfig {
            api_base_url: "localhost".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "portal_app",
            "--api-url",
            "http://127.0.0.1:8080",
            "--log",
            "both",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILENAME));
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(cli.log, Some(LogDestination::Both));
        assert_eq!(cli.log_level, Some(LogLevel::Warn));
    }
}
