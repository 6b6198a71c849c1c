//! Partial configuration produced by one source
//!
//! A layer only carries the settings its source actually names, so a later
//! layer can set a field back to its default value.

use crate::{
    types::{SplitStrategy, TokenizerEncoding},
    Config,
};
use serde::Deserialize;

/// Settings named by one config file, the environment or a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub chunking: ChunkingLayer,
    pub normalize: NormalizeLayer,
    pub boundaries: BoundaryLayer,
    pub tokenizer: TokenizerLayer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingLayer {
    pub max_tokens: Option<usize>,
    pub overlap_tokens: Option<usize>,
    pub strategy: Option<SplitStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeLayer {
    pub strip_control_chars: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoundaryLayer {
    pub heading_marker: Option<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizerLayer {
    pub encoding: Option<TokenizerEncoding>,
}

impl ConfigLayer {
    /// Layer that names no setting at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layer with only the two token budgets set
    pub fn budget(max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            chunking: ChunkingLayer {
                max_tokens: Some(max_tokens),
                overlap_tokens: Some(overlap_tokens),
                strategy: None,
            },
            ..Default::default()
        }
    }
}

/// Every field of a complete config counts as set
impl From<Config> for ConfigLayer {
    fn from(config: Config) -> Self {
        Self {
            chunking: ChunkingLayer {
                max_tokens: Some(config.chunking.max_tokens),
                overlap_tokens: Some(config.chunking.overlap_tokens),
                strategy: Some(config.chunking.strategy),
            },
            normalize: NormalizeLayer {
                strip_control_chars: Some(config.normalize.strip_control_chars),
            },
            boundaries: BoundaryLayer {
                heading_marker: Some(config.boundaries.heading_marker),
            },
            tokenizer: TokenizerLayer {
                encoding: Some(config.tokenizer.encoding),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_fields_stay_none() {
        let layer: ConfigLayer = ::toml::from_str("[chunking]\nmax_tokens = 256\n").unwrap();
        assert_eq!(layer.chunking.max_tokens, Some(256));
        assert_eq!(layer.chunking.overlap_tokens, None);
        assert!(layer.tokenizer.encoding.is_none());
        assert!(!layer.is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ConfigLayer, _> = ::toml::from_str("[chunking]\nmax_token = 256\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("max_token"), "{err}");
    }

    #[test]
    fn test_full_config_sets_everything() {
        let layer = ConfigLayer::from(Config::default());
        assert_eq!(layer.chunking.max_tokens, Some(256));
        assert_eq!(layer.boundaries.heading_marker, Some('#'));
        assert_eq!(layer.tokenizer.encoding, Some(TokenizerEncoding::O200kBase));
    }
}
