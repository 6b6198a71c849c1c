//! Config files on disk
//!
//! A file is read as a [`ConfigLayer`]: only the settings it names take
//! part in layering. Unknown keys are rejected so a misspelt budget does not
//! silently fall back to the default.

use super::{formats, layer::ConfigLayer, merge, ConfigFormat};
use crate::{error::ConfigError, Config, Result, Validate};
use std::fs;
use std::path::Path;

impl ConfigFormat {
    /// Format implied by the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read the settings named in a config file
pub fn read_layer<P: AsRef<Path>>(path: P) -> Result<ConfigLayer> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let path_str = path.to_str();
    let layer: ConfigLayer = match format {
        ConfigFormat::Yaml if content.trim().is_empty() => ConfigLayer::default(),
        ConfigFormat::Yaml => formats::yaml::parse_with_path(&content, path_str)?,
        ConfigFormat::Toml => formats::toml::parse_with_path(&content, path_str)?,
        ConfigFormat::Json => formats::json::parse_with_path(&content, path_str)?,
    };

    check_budget(&layer, path)?;
    Ok(layer)
}

/// Load a standalone config: defaults plus the file's settings
///
/// Validation failures name the file they came from.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let config = merge::merge(Config::default(), read_layer(path)?);

    config.validate().map_err(|e| match e {
        ConfigError::ValidationError { field, message } => ConfigError::ValidationError {
            field,
            message: format!("{} (in {})", message, path.display()),
        },
        other => other,
    })?;

    Ok(config)
}

/// A file that sets both budgets must be consistent on its own, since no
/// other layer can repair it.
fn check_budget(layer: &ConfigLayer, path: &Path) -> Result<()> {
    if let (Some(max), Some(overlap)) = (layer.chunking.max_tokens, layer.chunking.overlap_tokens)
    {
        if overlap >= max {
            return Err(ConfigError::ValidationError {
                field: "chunking.overlap_tokens".to_string(),
                message: format!(
                    "{} sets overlap_tokens = {} but max_tokens = {}; the overlap must leave room for chunk content",
                    path.display(),
                    overlap,
                    max
                ),
            });
        }
    }
    Ok(())
}
