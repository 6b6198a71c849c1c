//! Tokenizer vocabulary selection

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// BPE vocabulary used to measure chunks
    #[serde(default)]
    pub encoding: TokenizerEncoding,
}

/// Fixed, versioned BPE vocabularies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerEncoding {
    /// GPT-4o family
    #[default]
    O200kBase,
    /// GPT-4 / GPT-3.5 family
    Cl100kBase,
}

impl TokenizerEncoding {
    pub const OPTIONS: &'static [&'static str] = &["o200k_base", "cl100k_base"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenizerEncoding::O200kBase => "o200k_base",
            TokenizerEncoding::Cl100kBase => "cl100k_base",
        }
    }

    pub fn parse(value: &str) -> crate::error::Result<Self> {
        match value.to_lowercase().as_str() {
            "o200k_base" | "o200k" => Ok(TokenizerEncoding::O200kBase),
            "cl100k_base" | "cl100k" => Ok(TokenizerEncoding::Cl100kBase),
            _ => Err(crate::error::ConfigError::invalid_enum(
                "tokenizer.encoding",
                value,
                Self::OPTIONS,
            )),
        }
    }
}

impl fmt::Display for TokenizerEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl crate::validation::Validate for TokenizerConfig {
    fn validate(&self) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_serialization() {
        assert_eq!(
            serde_json::to_string(&TokenizerEncoding::Cl100kBase).unwrap(),
            "\"cl100k_base\""
        );
        let parsed: TokenizerEncoding = serde_json::from_str("\"o200k_base\"").unwrap();
        assert_eq!(parsed, TokenizerEncoding::O200kBase);
    }

    #[test]
    fn test_encoding_parse_suggests() {
        let err = TokenizerEncoding::parse("cl100k_bse").unwrap_err();
        assert!(err.to_string().contains("Did you mean 'cl100k_base'?"));
    }
}
