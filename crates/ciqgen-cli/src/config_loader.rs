//! Configuration resolution for the CLI
//!
//! Builds the layered config: defaults, then `ciqgen.toml` (explicit
//! `--config` path or the file in the current directory, when present),
//! then `CIQGEN_*` environment variables. Per-command flags apply their
//! own CLI-layer overrides on top.

use anyhow::{Context, Result};
use ciqgen_core::config::{ConfigSource, LayeredConfig};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "ciqgen.toml";

pub fn load_config(config_path: Option<&Path>) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match config_path {
        Some(path) => {
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
        }
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                config = config
                    .load_from_file(&default_path)
                    .context("Failed to load ciqgen.toml")?;
            }
        }
    }

    Ok(config.load_from_env())
}

/// Apply a `--output` style override at CLI precedence.
pub fn override_output_dir(config: &mut LayeredConfig, output: Option<PathBuf>) {
    if let Some(dir) = output {
        config.output_dir.update(dir, ConfigSource::Cli);
    }
}
