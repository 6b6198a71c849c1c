//! Chunking budget configuration

use serde::{Deserialize, Serialize};

/// Configuration for token-bounded chunking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk, overlap included
    ///
    /// Should match the downstream model's context or embedding limit.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Tokens copied from the tail of the previous chunk
    ///
    /// Must be strictly less than `max_tokens`.
    #[serde(default = "default_overlap")]
    pub overlap_tokens: usize,

    /// How oversized text is cut
    #[serde(default)]
    pub strategy: SplitStrategy,
}

/// Where the splitter starts looking for cut points
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SplitStrategy {
    /// Headings, then paragraphs, then sentences, then words, then characters
    #[default]
    Hierarchical,
    /// Pack words up to the budget, ignoring document structure
    Split,
}

impl SplitStrategy {
    pub const OPTIONS: &'static [&'static str] = &["hierarchical", "split"];

    pub fn parse(value: &str) -> crate::error::Result<Self> {
        match value.to_lowercase().as_str() {
            "hierarchical" => Ok(SplitStrategy::Hierarchical),
            "split" => Ok(SplitStrategy::Split),
            _ => Err(crate::error::ConfigError::invalid_enum(
                "chunking.strategy",
                value,
                Self::OPTIONS,
            )),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap(),
            strategy: SplitStrategy::default(),
        }
    }
}

impl crate::validation::Validate for ChunkingConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::validation::{validate_below, validate_positive};

        validate_positive("chunking.max_tokens", self.max_tokens, 0)?;
        validate_below(
            "chunking.overlap_tokens",
            self.overlap_tokens,
            "chunking.max_tokens",
            self.max_tokens,
        )?;

        Ok(())
    }
}

fn default_max_tokens() -> usize {
    256
}

fn default_overlap() -> usize {
    16
}
