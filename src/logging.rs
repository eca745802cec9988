//! Structured logging setup
//!
//! Every module logs through `tracing`; this module installs the subscriber
//! the CLI uses. Logs go to stderr so stdout stays free for the
//! post-generation instructions.
//!
//! | Variable                       | Default  | Meaning                          |
//! |--------------------------------|----------|----------------------------------|
//! | `CRUDGEN_LOG_LEVEL`            | `info`   | trace/debug/info/warn/error      |
//! | `CRUDGEN_LOG_FORMAT`           | `pretty` | `pretty` or `json`               |
//! | `CRUDGEN_LOG_TARGET_FILTER`    | unset    | extra comma separated directives |
//! | `CRUDGEN_LOG_INCLUDE_LOCATION` | `false`  | add file:line to every event     |
//!
//! `RUST_LOG`, when set, replaces the level entirely.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: human readable for terminals, JSON for log shippers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from `CRUDGEN_LOG_*` environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("CRUDGEN_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: lookup("CRUDGEN_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or(defaults.format),
            target_filter: lookup("CRUDGEN_LOG_TARGET_FILTER").filter(|s| !s.trim().is_empty()),
            include_location: lookup("CRUDGEN_LOG_INCLUDE_LOCATION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.include_location),
        }
    }

    /// Raise the level to `debug` (the CLI's `-v`)
    pub fn verbose(mut self) -> Self {
        self.log_level = "debug".to_string();
        self
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Build the filter: `RUST_LOG` if set, else the level, plus target directives
    pub fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails when a subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::from_vars(lookup(&[]));
        assert_eq!(config, LogConfig::default());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.include_location);
    }

    #[test]
    fn test_log_config_from_vars() {
        let config = LogConfig::from_vars(lookup(&[
            ("CRUDGEN_LOG_LEVEL", "warn"),
            ("CRUDGEN_LOG_FORMAT", "JSON"),
            ("CRUDGEN_LOG_TARGET_FILTER", "crudgen::generator=trace"),
            ("CRUDGEN_LOG_INCLUDE_LOCATION", "true"),
        ]));
        assert_eq!(config.level(), Level::WARN);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.target_filter.as_deref(), Some("crudgen::generator=trace"));
        assert!(config.include_location);
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Pretty);
    }

    #[test]
    fn test_verbose_and_unknown_levels() {
        let config = LogConfig::default().verbose();
        assert_eq!(config.level(), Level::DEBUG);
        let config = LogConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }
}
