use semchunk_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors surfaced by the chunking pipeline
///
/// Both kinds abort the whole call; no partial chunk list is returned.
#[derive(Debug, Error)]
pub enum ChunkError {
    /// Budgets or options failed validation before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The tokenizer could not be loaded or could not measure a span
    #[error("Tokenization failed: {0}")]
    TokenizationFailure(String),
}
