//! Layered configuration: defaults < config file < environment < CLI
//!
//! The original tools hardcoded their template and log folders; here they
//! are configuration with the same precedence scheme throughout.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CiqgenError, Result};

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// WinFiol log prefix baked into generated health-check scripts when the
/// config does not override it.
pub const DEFAULT_PREPOST_LOG_PREFIX: &str = r"S:\vendor_ericsson\IRS\WinFiol\Log\";

/// Layered configuration for ciqgen
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Where generated scripts and bundles land.
    pub output_dir: ConfigValue<PathBuf>,
    /// Folder holding the XML templates.
    pub template_dir: ConfigValue<PathBuf>,
    /// Folder the `files` subcommands browse; defaults to the output dir.
    pub log_dir: ConfigValue<PathBuf>,
    /// `@SET {D}` prefix embedded in health-check scripts.
    pub prepost_log_prefix: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            output_dir: ConfigValue::new(PathBuf::from("out"), ConfigSource::Default),
            template_dir: ConfigValue::new(PathBuf::from("templates"), ConfigSource::Default),
            log_dir: ConfigValue::new(PathBuf::from("out"), ConfigSource::Default),
            prepost_log_prefix: ConfigValue::new(
                DEFAULT_PREPOST_LOG_PREFIX.to_string(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CiqgenError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CiqgenError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(dir) = file_config.output_dir {
            self.output_dir.update(dir, ConfigSource::File);
        }
        if let Some(dir) = file_config.template_dir {
            self.template_dir.update(dir, ConfigSource::File);
        }
        if let Some(dir) = file_config.log_dir {
            self.log_dir.update(dir, ConfigSource::File);
        }
        if let Some(prefix) = file_config.prepost_log_prefix {
            self.prepost_log_prefix.update(prefix, ConfigSource::File);
        }

        Ok(self)
    }

    /// Apply environment variable overrides (`CIQGEN_*`)
    pub fn load_from_env(mut self) -> Self {
        if let Ok(dir) = env::var("CIQGEN_OUTPUT_DIR") {
            self.output_dir
                .update(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(dir) = env::var("CIQGEN_TEMPLATE_DIR") {
            self.template_dir
                .update(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(dir) = env::var("CIQGEN_LOG_DIR") {
            self.log_dir
                .update(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(prefix) = env::var("CIQGEN_PREPOST_LOG_PREFIX") {
            self.prepost_log_prefix
                .update(prefix, ConfigSource::Environment);
        }
        self
    }
}

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize)]
struct FileConfig {
    output_dir: Option<PathBuf>,
    template_dir: Option<PathBuf>,
    log_dir: Option<PathBuf>,
    prepost_log_prefix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_precedence_does_not_override() {
        let mut value = ConfigValue::new(1u32, ConfigSource::Environment);
        value.update(2, ConfigSource::File);
        assert_eq!(value.value, 1);
        value.update(3, ConfigSource::Cli);
        assert_eq!(value.value, 3);
    }

    #[test]
    fn test_file_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ciqgen.toml");
        fs::write(&path, "output_dir = \"/srv/scripts\"\n").unwrap();

        let config = LayeredConfig::with_defaults()
            .load_from_file(&path)
            .unwrap();
        assert_eq!(config.output_dir.value, PathBuf::from("/srv/scripts"));
        assert_eq!(config.output_dir.source, ConfigSource::File);
        // Untouched keys keep their defaults.
        assert_eq!(config.template_dir.value, PathBuf::from("templates"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ciqgen.toml");
        fs::write(&path, "not = [valid").unwrap();

        let err = LayeredConfig::with_defaults()
            .load_from_file(&path)
            .unwrap_err();
        assert!(matches!(err, CiqgenError::ConfigInvalid { .. }));
    }
}
