//! Semantic text chunking for retrieval pipelines
//!
//! Splits documents into ordered chunks that fit a token budget, cutting at
//! the strongest structural boundary available (heading, paragraph,
//! sentence, word, character) and prefixing each chunk with a
//! tokenizer-accurate overlap from the one before it.
//!
//! # Example
//!
//! ```no_run
//! let chunks = semchunk_core::chunk("# Title\n\nSome text.", 256, 16)?;
//! for chunk in &chunks {
//!     println!("{} ({} tokens)", chunk.index, chunk.token_count);
//! }
//! # Ok::<(), semchunk_core::ChunkError>(())
//! ```

pub mod chunking;
pub mod error;
pub mod models;

pub use chunking::boundary::{Boundary, BoundaryMap, BoundaryRank};
pub use chunking::tokenizer::{TiktokenTokenizer, Tokenizer};
pub use chunking::Chunker;
pub use error::{ChunkError, Result};
pub use models::{Chunk, PageChunk};
pub use semchunk_config::Config;

/// Chunk `text` with the default tokenizer and options.
///
/// Budgets are checked before the tokenizer is loaded; `overlap_tokens` must
/// be smaller than a non-zero `max_tokens`.
pub fn chunk(text: &str, max_tokens: usize, overlap_tokens: usize) -> Result<Vec<Chunk>> {
    Chunker::new(&Config::with_budget(max_tokens, overlap_tokens))?.chunk(text)
}
