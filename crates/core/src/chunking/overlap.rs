use super::span::Span;
use super::tokenizer::Tokenizer;
use crate::error::Result;
use crate::models::Chunk;
use tracing::trace;

/// Prefix taken from the end of the previous chunk's core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Overlap {
    len: usize,
    tokens: usize,
    /// Tokens of overlap plus core, measured together
    total: usize,
}

/// Turns splitter spans into chunks, prefixing each chunk after the first
/// with the tail of its predecessor.
pub struct OverlapStitcher<'a> {
    tokenizer: &'a dyn Tokenizer,
    overlap_tokens: usize,
    max_tokens: usize,
}

impl<'a> OverlapStitcher<'a> {
    pub fn new(tokenizer: &'a dyn Tokenizer, overlap_tokens: usize, max_tokens: usize) -> Self {
        Self {
            tokenizer,
            overlap_tokens,
            max_tokens,
        }
    }

    /// Build indexed chunks from gap-free spans of `text`
    pub fn stitch(&self, text: &str, spans: &[Span]) -> Result<Vec<Chunk>> {
        let mut chunks = Vec::with_capacity(spans.len());
        let mut previous: Option<&Span> = None;

        for (index, span) in spans.iter().enumerate() {
            let core_tokens = span.token_count(text, self.tokenizer)?;
            let overlap = match previous {
                Some(prev) => self.overlap_for(text, prev, span, core_tokens)?,
                None => None,
            };

            let chunk = match overlap {
                Some(overlap) => Chunk {
                    index,
                    text: text[span.start - overlap.len..span.end].to_string(),
                    start_offset: span.start,
                    end_offset: span.end,
                    token_count: overlap.total,
                    overlap_len: overlap.len,
                    overlap_token_count: overlap.tokens,
                },
                None => Chunk {
                    index,
                    text: span.text(text).to_string(),
                    start_offset: span.start,
                    end_offset: span.end,
                    token_count: core_tokens,
                    overlap_len: 0,
                    overlap_token_count: 0,
                },
            };

            chunks.push(chunk);
            previous = Some(span);
        }

        Ok(chunks)
    }

    /// Longest tail of `prev` that fits both the overlap budget and the room
    /// left next to `core`.
    ///
    /// Shrinks one token at a time from the overlap budget. Tails that do not
    /// decode to a suffix of the predecessor, such as a cut inside a
    /// multi-byte character, are skipped.
    fn overlap_for(
        &self,
        text: &str,
        prev: &Span,
        core: &Span,
        core_tokens: usize,
    ) -> Result<Option<Overlap>> {
        if self.overlap_tokens == 0 || prev.is_empty() {
            return Ok(None);
        }

        let prev_text = prev.text(text);
        let tokens = self.tokenizer.encode(prev_text)?;
        let mut take = self.overlap_tokens.min(tokens.len());

        while take > 0 {
            let candidate = if take == tokens.len() {
                prev_text.to_string()
            } else {
                match self.tokenizer.decode(&tokens[tokens.len() - take..]) {
                    Ok(decoded) => decoded,
                    Err(e) => {
                        trace!(take, error = %e, "Skipping undecodable overlap tail");
                        take -= 1;
                        continue;
                    }
                }
            };

            if !candidate.is_empty() && prev_text.ends_with(candidate.as_str()) {
                let overlap_tokens = self.tokenizer.count_tokens(&candidate)?;
                if overlap_tokens <= self.overlap_tokens
                    && overlap_tokens + core_tokens <= self.max_tokens
                {
                    let combined = &text[core.start - candidate.len()..core.end];
                    let total = self.tokenizer.count_tokens(combined)?;
                    if total <= self.max_tokens {
                        return Ok(Some(Overlap {
                            len: candidate.len(),
                            tokens: overlap_tokens,
                            total,
                        }));
                    }
                }
            }

            take -= 1;
        }

        trace!(start = core.start, "No overlap fits");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::tokenizer::CharTokenizer;
    use crate::error::ChunkError;
    use pretty_assertions::assert_eq;

    fn spans(cuts: &[usize], len: usize) -> Vec<Span> {
        let mut bounds = vec![0];
        bounds.extend_from_slice(cuts);
        bounds.push(len);
        bounds.windows(2).map(|w| Span::new(w[0], w[1])).collect()
    }

    #[test]
    fn test_first_chunk_has_no_overlap() {
        let text = "abcdef";
        let stitcher = OverlapStitcher::new(&CharTokenizer, 2, 10);
        let chunks = stitcher.stitch(text, &spans(&[], text.len())).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "abcdef");
        assert!(!chunks[0].has_overlap());
    }

    #[test]
    fn test_overlap_is_tail_of_previous_core() {
        let text = "abcdefghij";
        let stitcher = OverlapStitcher::new(&CharTokenizer, 2, 10);
        let chunks = stitcher.stitch(text, &spans(&[5], text.len())).unwrap();

        assert_eq!(chunks[1].text, "defghij");
        assert_eq!(chunks[1].overlap_text(), "de");
        assert_eq!(chunks[1].core_text(), "fghij");
        assert_eq!(chunks[1].overlap_token_count, 2);
        assert_eq!(chunks[1].token_count, 7);
        assert_eq!((chunks[1].start_offset, chunks[1].end_offset), (5, 10));
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn test_short_predecessor_is_taken_whole() {
        let text = "abcdefgh";
        let stitcher = OverlapStitcher::new(&CharTokenizer, 5, 20);
        let chunks = stitcher.stitch(text, &spans(&[2], text.len())).unwrap();
        assert_eq!(chunks[1].overlap_text(), "ab");
    }

    #[test]
    fn test_overlap_shrinks_to_fit_budget() {
        let text = "abcdefghij";
        // A core of 6 leaves room for 2 of the 4 requested
        let stitcher = OverlapStitcher::new(&CharTokenizer, 4, 8);
        let chunks = stitcher.stitch(text, &spans(&[4], text.len())).unwrap();
        assert_eq!(chunks[1].overlap_text(), "cd");
        assert_eq!(chunks[1].token_count, 8);

        let stitcher = OverlapStitcher::new(&CharTokenizer, 4, 6);
        let chunks = stitcher.stitch(text, &spans(&[4], text.len())).unwrap();
        assert!(!chunks[1].has_overlap());
        assert_eq!(chunks[1].text, "efghij");
    }

    #[test]
    fn test_zero_overlap() {
        let text = "abcdefghij";
        let stitcher = OverlapStitcher::new(&CharTokenizer, 0, 10);
        let chunks = stitcher.stitch(text, &spans(&[3, 6], text.len())).unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["abc", "def", "ghij"]);
    }

    struct NoDecode;

    impl Tokenizer for NoDecode {
        fn encode(&self, text: &str) -> Result<Vec<usize>> {
            CharTokenizer.encode(text)
        }

        fn decode(&self, _tokens: &[usize]) -> Result<String> {
            Err(ChunkError::TokenizationFailure("partial character".to_string()))
        }
    }

    #[test]
    fn test_undecodable_tails_are_skipped() {
        let text = "abcdefgh";
        // Only the whole predecessor avoids decoding
        let stitcher = OverlapStitcher::new(&NoDecode, 3, 20);
        let chunks = stitcher.stitch(text, &spans(&[4], text.len())).unwrap();
        assert!(!chunks[1].has_overlap());

        let stitcher = OverlapStitcher::new(&NoDecode, 4, 20);
        let chunks = stitcher.stitch(text, &spans(&[4], text.len())).unwrap();
        assert_eq!(chunks[1].overlap_text(), "abcd");
    }
}
