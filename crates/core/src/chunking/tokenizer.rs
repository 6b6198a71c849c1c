use crate::error::{ChunkError, Result};
use once_cell::sync::OnceCell;
use semchunk_config::TokenizerEncoding;
use tiktoken_rs::{cl100k_base, o200k_base, CoreBPE};
use tracing::info;

/// Token measurement capability the chunker is written against.
///
/// Implementations must be deterministic: the same text always yields the
/// same tokens, and decoding a token run produced by `encode` yields the
/// bytes it was encoded from.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<usize>>;

    fn decode(&self, tokens: &[usize]) -> Result<String>;

    fn count_tokens(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }
}

static O200K: OnceCell<CoreBPE> = OnceCell::new();
static CL100K: OnceCell<CoreBPE> = OnceCell::new();

/// Loads the BPE tables for `encoding` once per process; later calls share
/// the same immutable instance.
fn shared_bpe(encoding: TokenizerEncoding) -> Result<&'static CoreBPE> {
    let cell = match encoding {
        TokenizerEncoding::O200kBase => &O200K,
        TokenizerEncoding::Cl100kBase => &CL100K,
    };

    cell.get_or_try_init(|| {
        info!(%encoding, "Loading tokenizer vocabulary");
        match encoding {
            TokenizerEncoding::O200kBase => o200k_base(),
            TokenizerEncoding::Cl100kBase => cl100k_base(),
        }
    })
    .map_err(|e| ChunkError::TokenizationFailure(format!("failed to load {}: {}", encoding, e)))
}

/// GPT-compatible tokenizer backed by `tiktoken-rs`
///
/// Text is encoded as ordinary text, so special-token strings such as
/// `<|endoftext|>` found in documents are counted like any other text.
#[derive(Clone)]
pub struct TiktokenTokenizer {
    bpe: &'static CoreBPE,
    encoding: TokenizerEncoding,
}

impl TiktokenTokenizer {
    pub fn new(encoding: TokenizerEncoding) -> Result<Self> {
        Ok(Self {
            bpe: shared_bpe(encoding)?,
            encoding,
        })
    }

    pub fn encoding(&self) -> TokenizerEncoding {
        self.encoding
    }
}

impl std::fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>> {
        Ok(self.bpe.encode_ordinary(text))
    }

    fn decode(&self, tokens: &[usize]) -> Result<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| ChunkError::TokenizationFailure(format!("decode failed: {}", e)))
    }
}

/// One token per character, decoding token ids back to code points
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct CharTokenizer;

#[cfg(test)]
impl Tokenizer for CharTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<usize>> {
        Ok(text.chars().map(|c| c as usize).collect())
    }

    fn decode(&self, tokens: &[usize]) -> Result<String> {
        tokens
            .iter()
            .map(|&t| {
                u32::try_from(t)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| ChunkError::TokenizationFailure(format!("bad token {}", t)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_tokens() {
        let tokenizer = TiktokenTokenizer::new(TokenizerEncoding::O200kBase).unwrap();
        let count = tokenizer.count_tokens("Hello world.").unwrap();
        assert!(count > 0);
        assert!(count < 6);
        assert_eq!(tokenizer.count_tokens("").unwrap(), 0);
    }

    #[test]
    fn test_encodings_share_tables() {
        let a = TiktokenTokenizer::new(TokenizerEncoding::Cl100kBase).unwrap();
        let b = TiktokenTokenizer::new(TokenizerEncoding::Cl100kBase).unwrap();
        assert!(std::ptr::eq(a.bpe, b.bpe));
        assert_eq!(a.encoding(), TokenizerEncoding::Cl100kBase);
    }

    #[test]
    fn test_decode_round_trip() {
        let tokenizer = TiktokenTokenizer::new(TokenizerEncoding::O200kBase).unwrap();
        let text = "Chunking keeps paragraphs together.";
        let tokens = tokenizer.encode(text).unwrap();
        assert_eq!(tokenizer.decode(&tokens).unwrap(), text);
        let tail = tokenizer.decode(&tokens[tokens.len() - 2..]).unwrap();
        assert!(text.ends_with(&tail));
    }
}
