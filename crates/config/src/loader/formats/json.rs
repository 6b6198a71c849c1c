//! JSON format parser

use crate::{error::ConfigError, Config, Result};
use serde::de::DeserializeOwned;

/// Parse configuration from JSON string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse a config value or layer from JSON string with file path for better errors
pub fn parse_with_path<T: DeserializeOwned>(content: &str, path: Option<&str>) -> Result<T> {
    serde_json::from_str(content).map_err(|e| ConfigError::from_json_error(e, content, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_json() {
        let json = r#" {
            "chunking": {
                "max_tokens": 300,
                "overlap_tokens": 30
            },
            "normalize": { "strip_control_chars": false }
        }"#;
        let config = parse(json).unwrap();
        assert_eq!(config.chunking.max_tokens, 300);
        assert!(!config.normalize.strip_control_chars);
    }

    #[test]
    fn test_parse_error_has_caret() {
        let json = "{\n  \"chunking\": { \"max_tokens\": , }\n}";
        let err = parse(json).unwrap_err();
        assert!(err.to_string().contains('^'));
    }
}
