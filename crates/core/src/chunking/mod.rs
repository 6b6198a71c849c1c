//! Token-bounded chunking of normalized text.
//!
//! The pipeline runs normalize, classify boundaries, split, then stitch
//! overlap. Each stage lives in its own module; [`Chunker`] wires them
//! together for one validated [`Config`].

pub mod boundary;
pub mod normalize;
pub mod overlap;
pub mod span;
pub mod splitter;
pub mod tokenizer;

use crate::error::Result;
use crate::models::{Chunk, PageChunk};
use boundary::BoundaryClassifier;
use normalize::Normalizer;
use overlap::OverlapStitcher;
use semchunk_config::{Config, Validate};
use span::Span;
use splitter::{initial_rank, Splitter};
use std::sync::Arc;
use tokenizer::{TiktokenTokenizer, Tokenizer};
use tracing::{debug, instrument};

/// Splits documents into overlapping chunks that fit a token budget.
///
/// Holds no per-call state, so one instance can serve many threads.
#[derive(Clone)]
pub struct Chunker {
    config: Config,
    normalizer: Normalizer,
    classifier: BoundaryClassifier,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Chunker {
    /// Chunker using the tiktoken vocabulary selected in `config`.
    ///
    /// The configuration is validated before the vocabulary is loaded.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let tokenizer = TiktokenTokenizer::new(config.tokenizer.encoding)?;
        Self::with_tokenizer(config, Arc::new(tokenizer))
    }

    pub fn with_tokenizer(config: &Config, tokenizer: Arc<dyn Tokenizer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            normalizer: Normalizer::new(config.normalize.clone()),
            classifier: BoundaryClassifier::new(&config.boundaries),
            tokenizer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Text exactly as the chunker sees it; chunk offsets index into this
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Chunk `text`. Returns no chunks when nothing but whitespace remains
    /// after normalization.
    #[instrument(
        skip_all,
        fields(
            input_len = text.len(),
            max_tokens = self.config.chunking.max_tokens,
            overlap_tokens = self.config.chunking.overlap_tokens,
        )
    )]
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        let normalized = self.normalizer.normalize(text);
        if normalized.is_empty() {
            debug!("Nothing to chunk after normalization");
            return Ok(Vec::new());
        }

        let chunking = &self.config.chunking;
        let boundaries = self.classifier.classify(&normalized);

        // Cores leave room for a full overlap; validation keeps overlap < max.
        let core_budget = chunking.max_tokens - chunking.overlap_tokens;
        let splitter = Splitter::new(
            &normalized,
            &boundaries,
            self.tokenizer.as_ref(),
            core_budget,
        );
        let spans = splitter.split(
            Span::new(0, normalized.len()),
            initial_rank(chunking.strategy),
        )?;

        let stitcher = OverlapStitcher::new(
            self.tokenizer.as_ref(),
            chunking.overlap_tokens,
            chunking.max_tokens,
        );
        let chunks = stitcher.stitch(&normalized, &spans)?;

        debug!(
            chunks = chunks.len(),
            boundaries = boundaries.boundaries().len(),
            "Chunked text"
        );
        Ok(chunks)
    }

    /// Chunk one page of a larger document, tagging every chunk with its
    /// page number and source.
    pub fn chunk_page(&self, page: usize, text: &str, source: &str) -> Result<Vec<PageChunk>> {
        let chunks = self.chunk(text)?;
        Ok(chunks
            .into_iter()
            .map(|chunk| PageChunk {
                page,
                source: source.to_string(),
                chunk,
            })
            .collect())
    }
}

impl std::fmt::Debug for Chunker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunker")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
