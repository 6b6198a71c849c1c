//! TOML format parser

use crate::{error::ConfigError, Config, Result};
use serde::de::DeserializeOwned;

/// Parse configuration from TOML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse a config value or layer from TOML string with file path for better errors
pub fn parse_with_path<T: DeserializeOwned>(content: &str, path: Option<&str>) -> Result<T> {
    ::toml::from_str(content).map_err(|e| ConfigError::from_toml_error(e, content, path))
}
