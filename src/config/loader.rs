//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RunnerConfig;
use crate::config::validation::validate_config;
use crate::error::{Error, Result};

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RunnerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Configuration(format!("cannot read {}: {}", path.display(), e)))?;
    let config: RunnerConfig = toml::from_str(&content)
        .map_err(|e| Error::Configuration(format!("cannot parse {}: {}", path.display(), e)))?;

    validate_config(&config).map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Error::Configuration(format!("validation failed: {}", joined))
    })?;

    Ok(config)
}
