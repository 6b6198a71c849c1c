//! Configuration type definitions
//!
//! Each section is self-contained with validation and sensible defaults.

pub mod boundary;
pub mod chunking;
pub mod normalize;
pub mod tokenizer;

pub use boundary::BoundaryConfig;
pub use chunking::{ChunkingConfig, SplitStrategy};
pub use normalize::NormalizeConfig;
pub use tokenizer::{TokenizerConfig, TokenizerEncoding};

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Token budgets and split strategy
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Text cleanup applied before chunking
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Boundary detection settings
    #[serde(default)]
    pub boundaries: BoundaryConfig,

    /// Tokenizer vocabulary selection
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
}

impl Config {
    /// Default configuration with the given token budgets
    pub fn with_budget(max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            chunking: ChunkingConfig {
                max_tokens,
                overlap_tokens,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.chunking.validate()?;
        self.normalize.validate()?;
        self.boundaries.validate()?;
        self.tokenizer.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_with_budget() {
        let config = Config::with_budget(128, 8);
        assert_eq!(config.chunking.max_tokens, 128);
        assert_eq!(config.chunking.overlap_tokens, 8);
        assert_eq!(config.chunking.strategy, SplitStrategy::Hierarchical);
    }

    #[test]
    fn test_with_budget_rejects_overlap_at_max() {
        assert!(Config::with_budget(16, 16).validate().is_err());
    }
}
