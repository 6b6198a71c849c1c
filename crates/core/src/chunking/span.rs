use super::tokenizer::Tokenizer;
use crate::error::Result;
use once_cell::unsync::OnceCell;

/// A contiguous byte range of the normalized text with a lazily measured
/// token count.
#[derive(Debug, Clone)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    tokens: OnceCell<usize>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            tokens: OnceCell::new(),
        }
    }

    /// Span whose token count is already known
    pub fn with_count(start: usize, end: usize, tokens: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            tokens: OnceCell::with_value(tokens),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Token count of the span, measured once and then cached
    pub fn token_count(&self, text: &str, tokenizer: &dyn Tokenizer) -> Result<usize> {
        self.tokens
            .get_or_try_init(|| tokenizer.count_tokens(self.text(text)))
            .copied()
    }
}
