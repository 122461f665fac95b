//! Runtime configuration: optional RON file plus environment overrides.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use roster_feed::{FeedSettings, DEFAULT_ENDPOINT};
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

const DEFAULT_CONFIG_PATH: &str = "roster.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("poll_interval_ms must be greater than zero")]
    ZeroInterval,
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub endpoint: String,
    pub token: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        let feed = FeedSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            poll_interval_ms: millis(feed.poll_interval),
            connect_timeout_ms: millis(feed.connect_timeout),
            request_timeout_ms: millis(feed.request_timeout),
            max_bytes: feed.max_bytes,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl RosterConfig {
    /// Loads `$ROSTER_CONFIG` or `./roster.ron`, then applies `ROSTER_ENDPOINT`
    /// and `ROSTER_TOKEN`. A missing default file means defaults; a missing
    /// explicitly named file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let (path, explicit) = match env::var("ROSTER_CONFIG") {
            Ok(path) => (PathBuf::from(path), true),
            Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = match Self::from_file(&path) {
            Err(ConfigError::Read { source, .. })
                if !explicit && source.kind() == io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            other => other?,
        };

        if let Ok(endpoint) = env::var("ROSTER_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(token) = env::var("ROSTER_TOKEN") {
            config.token = token;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_feed_settings() {
        let config = RosterConfig::default();
        assert_eq!(config.feed_settings(), FeedSettings::default());
        assert_eq!(config.poll_interval_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: RosterConfig =
            ron::from_str(r#"(token: "abc", poll_interval_ms: 1000, log_destination: Both)"#)
                .unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = RosterConfig {
            poll_interval_ms: 0,
            ..RosterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = RosterConfig {
            log_level: "chatty".to_string(),
            ..RosterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn missing_named_file_is_read_error() {
        let err = RosterConfig::from_file(Path::new("/definitely/not/here.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
