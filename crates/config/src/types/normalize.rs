//! Text normalization settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Drop ASCII control characters (tabs and line breaks are kept)
    ///
    /// Extracted PDF text often carries form feeds and stray NULs.
    #[serde(default = "default_strip_control_chars")]
    pub strip_control_chars: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            strip_control_chars: default_strip_control_chars(),
        }
    }
}

impl crate::validation::Validate for NormalizeConfig {
    fn validate(&self) -> crate::error::Result<()> {
        Ok(())
    }
}

fn default_strip_control_chars() -> bool {
    true
}
