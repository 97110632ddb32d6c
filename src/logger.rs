//! Initializes `tracing` output for the command line tool.
//!
//! Library code only emits events; installing a subscriber is left to the
//! binary (or to whoever embeds the converter).
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{config, Error, Result};

// Targets whose events pass the default filter.
const MODULE_WHITELIST: &[&str] = &["rdf2vowl"];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogLevel {
    /// The "off" level.
    #[serde(rename = "off")]
    Off,
    /// The "trace" level.
    #[serde(rename = "trace")]
    Trace,
    /// The "debug" level.
    #[serde(rename = "debug")]
    Debug,
    /// The "info" level.
    #[serde(rename = "info")]
    #[default]
    Info,
    /// The "warn" level.
    #[serde(rename = "warn")]
    Warn,
    /// The "error" level.
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Format {
    #[serde(rename = "compact")]
    #[default]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level `{other}`")),
        }
    }
}

/// Installs the global subscriber, writing to stderr so that stdout stays
/// free for the generated JSON.
///
/// # Errors
///
/// Returns [`Error::Config`] when the filter does not parse or a global
/// subscriber is already installed.
pub fn init(config: &config::Logger) -> Result<()> {
    init_with_writer(config, std::io::stderr)
}

/// Same as [`init`] with a caller supplied writer.
///
/// # Errors
///
/// See [`init`].
pub fn init_with_writer<W>(config: &config::Logger, writer: W) -> Result<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if !config.enable {
        return Ok(());
    }

    let layer = tracing_subscriber::fmt::layer().with_writer(writer);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        Format::Compact => layer.compact().boxed(),
        Format::Pretty => layer.pretty().boxed(),
        Format::Json => layer.json().boxed(),
    };

    let filter = env_filter(config.override_filter.as_deref(), config.level)?;
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|err| Error::Config(err.to_string()))
}

fn env_filter(override_filter: Option<&str>, level: LogLevel) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = match override_filter {
        Some(filter) => filter.to_owned(),
        None => filter_directives(level),
    };
    EnvFilter::try_new(directives).map_err(|err| Error::Config(err.to_string()))
}

fn filter_directives(level: LogLevel) -> String {
    MODULE_WHITELIST
        .iter()
        .map(|module| format!("{module}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_text() {
        assert_eq!("DEBUG".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::Warn.to_string(), "warn");
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn default_filter_targets_the_crate() {
        assert_eq!(filter_directives(LogLevel::Trace), "rdf2vowl=trace");
    }

    #[test]
    fn disabled_logger_installs_nothing() {
        let config = config::Logger {
            enable: false,
            ..config::Logger::default()
        };
        assert!(init(&config).is_ok());
    }
}
