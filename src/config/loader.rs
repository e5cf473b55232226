use std::path::{Path, PathBuf};

use tracing::debug;

use crate::args::{DEFAULT_CONFIG_JSON, DEFAULT_CONFIG_TOML};
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Loads a configuration file from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = path {
        let path = PathBuf::from(path);
        return load_config_file(&path).map(Some);
    }

    for candidate in [DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_JSON] {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            debug!("Using config file {}", candidate.display());
            return load_config_file(&candidate).map(Some);
        }
    }

    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        }),
        Some(ext) => Err(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        }),
        None => Err(ConfigError::MissingExtension),
    }
}
