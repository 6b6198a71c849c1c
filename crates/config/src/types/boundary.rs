//! Boundary detection settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    /// Character that opens a heading line when repeated one or more times
    /// and followed by whitespace (`#`, `##`, ...)
    #[serde(default = "default_heading_marker")]
    pub heading_marker: char,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            heading_marker: default_heading_marker(),
        }
    }
}

impl crate::validation::Validate for BoundaryConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;

        if self.heading_marker.is_whitespace() || self.heading_marker.is_control() {
            return Err(ConfigError::ValidationError {
                field: "boundaries.heading_marker".to_string(),
                message: format!(
                    "heading marker must be a visible character, got {:?}",
                    self.heading_marker
                ),
            });
        }

        Ok(())
    }
}

fn default_heading_marker() -> char {
    '#'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_marker() {
        assert_eq!(BoundaryConfig::default().heading_marker, '#');
    }

    #[test]
    fn test_whitespace_marker_rejected() {
        let config = BoundaryConfig {
            heading_marker: ' ',
        };
        assert!(config.validate().is_err());
    }
}
