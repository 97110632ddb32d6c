//! Configuration for the converter and its logger.
//!
//! A configuration file is YAML or JSON, picked by extension:
//!
//! ```yaml
//! logger:
//!   enable: true
//!   level: debug
//!   format: compact
//! conversion:
//!   excludeClasses:
//!     - http://example.org/onto#Deprecated
//!   semanticAttributes: true
//! ```
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{logger, ontology::Iri, Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logger: Logger,
    #[serde(default)]
    pub conversion: ConversionOptions,
}

/// Logger configuration
///
/// Example (development):
/// ```yaml
/// logger:
///   enable: true
///   level: debug
///   format: compact
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Logger {
    /// Enable log write to stderr
    pub enable: bool,

    /// Set the logger level.
    ///
    /// * options: `trace` | `debug` | `info` | `warn` | `error` | `off`
    #[serde(default)]
    pub level: logger::LogLevel,

    /// Set the logger format.
    ///
    /// * options: `compact` | `pretty` | `json`
    #[serde(default)]
    pub format: logger::Format,

    /// Override our custom tracing filter.
    ///
    /// Set this to your own filter if you want to see traces from internal
    /// libraries.
    pub override_filter: Option<String>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            enable: true,
            level: logger::LogLevel::default(),
            format: logger::Format::default(),
            override_filter: None,
        }
    }
}

/// Knobs of a single conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Classes removed, with their sub-classes and members, before assembly.
    pub exclude_classes: Vec<Iri>,
    /// Emit transitive/symmetric tags, inverse ids and equivalent classes.
    pub semantic_attributes: bool,
    /// Draw type-membership edges for members of equivalent classes too.
    pub include_equivalent_members: bool,
}

impl ConversionOptions {
    #[must_use]
    pub fn with_excluded(mut self, classes: impl IntoIterator<Item = Iri>) -> Self {
        self.exclude_classes.extend(classes);
        self
    }

    #[must_use]
    pub fn with_semantic_attributes(mut self, enabled: bool) -> Self {
        self.semantic_attributes = enabled;
        self
    }

    #[must_use]
    pub fn with_equivalent_members(mut self, enabled: bool) -> Self {
        self.include_equivalent_members = enabled;
        self
    }
}

impl Config {
    /// Loads a configuration file, reading `.json` files as JSON and
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error when the file can not be read or does not match the
    /// configuration schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        tracing::debug!(path = %path.display(), "configuration_loaded");
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::Yaml`] when the text is not a valid configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Json`] when the text is not a valid configuration.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parses a command line log level override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unknown level names.
    pub fn set_log_level(&mut self, level: &str) -> Result<()> {
        self.logger.level = level.parse().map_err(Error::Config)?;
        Ok(())
    }
}
