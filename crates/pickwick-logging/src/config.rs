// ABOUTME: Logging configuration with environment variable overrides
// ABOUTME: Controls level, per-module directives, and console/file/JSON targets

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Serializable wrapper around `tracing::Level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self(Level::TRACE)),
            "debug" => Ok(Self(Level::DEBUG)),
            "info" => Ok(Self(Level::INFO)),
            "warn" | "warning" => Ok(Self(Level::WARN)),
            "error" => Ok(Self(Level::ERROR)),
            other => bail!("invalid log level '{other}': expected trace, debug, info, warn or error"),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for LogLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string().to_lowercase())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Configuration for the logging subscriber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    pub level: LogLevel,

    /// Extra filter directives, `module=level` style.
    pub directives: Vec<String>,

    /// Enable console output.
    pub console: bool,

    /// Emit JSON-structured lines instead of human-readable ones.
    pub json: bool,

    /// Log file path; `None` disables file output.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            directives: Vec::new(),
            console: true,
            json: false,
            file: Some(default_log_file_path()),
        }
    }
}

impl LoggingConfig {
    /// Default configuration with environment overrides applied.
    ///
    /// `PICKWICK_LOG` takes precedence over `RUST_LOG`; both accept either a
    /// bare level or a comma-separated directive list. `PICKWICK_LOG_JSON`,
    /// `PICKWICK_LOG_NO_CONSOLE` and `PICKWICK_LOG_NO_FILE` toggle outputs.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(spec) = env::var("PICKWICK_LOG") {
            config.apply_filter_spec(&spec).context("invalid PICKWICK_LOG")?;
        } else if let Ok(spec) = env::var("RUST_LOG") {
            config.apply_filter_spec(&spec).context("invalid RUST_LOG")?;
        }

        if env::var("PICKWICK_LOG_JSON").is_ok() {
            config.json = true;
        }
        if env::var("PICKWICK_LOG_NO_CONSOLE").is_ok() {
            config.console = false;
        }
        if env::var("PICKWICK_LOG_NO_FILE").is_ok() {
            config.file = None;
        }

        Ok(config)
    }

    /// Parse a `level` or `module=level,...` spec into this configuration.
    fn apply_filter_spec(&mut self, spec: &str) -> Result<()> {
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            if directive.contains('=') {
                self.directives.push(directive.to_string());
            } else {
                self.level = directive.parse()?;
            }
        }
        Ok(())
    }
}

/// Default log file location: `<config dir>/pickwick/pickwick.log`.
fn default_log_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("pickwick").join("pickwick.log"))
        .unwrap_or_else(|| PathBuf::from("pickwick.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_console_and_file() {
        let config = LoggingConfig::default();
        assert_eq!(config.level.0, Level::INFO);
        assert!(config.console);
        assert!(!config.json);
        assert!(config.file.is_some());
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!("TRACE".parse::<LogLevel>().unwrap().0, Level::TRACE);
        assert_eq!("Warn".parse::<LogLevel>().unwrap().0, Level::WARN);
        assert_eq!("warning".parse::<LogLevel>().unwrap().0, Level::WARN);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn filter_spec_splits_global_level_and_directives() {
        let mut config = LoggingConfig::default();
        config
            .apply_filter_spec("debug,pickwick_core=trace, pickwick_logging=warn")
            .unwrap();

        assert_eq!(config.level.0, Level::DEBUG);
        assert_eq!(
            config.directives,
            vec!["pickwick_core=trace", "pickwick_logging=warn"]
        );
    }

    #[test]
    fn log_level_round_trips_through_serde() {
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level.0, Level::DEBUG);
        assert_eq!(serde_json::to_string(&level).unwrap(), "\"debug\"");
    }

    #[test]
    fn default_path_ends_with_crate_log() {
        assert!(
            default_log_file_path()
                .to_string_lossy()
                .contains("pickwick.log")
        );
    }
}
