use super::boundary::{BoundaryMap, BoundaryRank};
use super::span::Span;
use super::tokenizer::Tokenizer;
use crate::error::Result;
use semchunk_config::SplitStrategy;
use std::iter;
use tracing::{debug, trace};

/// Rank a whole document is first split at for the given strategy
pub fn initial_rank(strategy: SplitStrategy) -> BoundaryRank {
    match strategy {
        SplitStrategy::Hierarchical => BoundaryRank::Heading,
        SplitStrategy::Split => BoundaryRank::WordBoundary,
    }
}

/// Breaks spans into pieces of at most `budget` tokens, cutting at the
/// strongest boundary available and falling back to weaker ones.
pub struct Splitter<'a> {
    text: &'a str,
    boundaries: &'a BoundaryMap,
    tokenizer: &'a dyn Tokenizer,
    budget: usize,
}

impl<'a> Splitter<'a> {
    pub fn new(
        text: &'a str,
        boundaries: &'a BoundaryMap,
        tokenizer: &'a dyn Tokenizer,
        budget: usize,
    ) -> Self {
        Self {
            text,
            boundaries,
            tokenizer,
            budget,
        }
    }

    /// Split `span` into ordered, gap-free pieces.
    ///
    /// Each piece fits the budget unless it has no interior cut position at
    /// any rank, in which case it is returned oversized.
    pub fn split(&self, span: Span, rank: BoundaryRank) -> Result<Vec<Span>> {
        let mut pieces = Vec::new();
        let mut pending = vec![(span, rank)];

        while let Some((span, rank)) = pending.pop() {
            if span.is_empty() {
                continue;
            }

            let tokens = span.token_count(self.text, self.tokenizer)?;
            if tokens <= self.budget {
                pieces.push(span);
                continue;
            }

            let Some((used, cuts)) = self.coarsest_cuts(&span, rank) else {
                debug!(
                    start = span.start,
                    end = span.end,
                    tokens,
                    budget = self.budget,
                    "Indivisible unit exceeds budget, keeping it whole"
                );
                pieces.push(span);
                continue;
            };

            trace!(
                start = span.start,
                end = span.end,
                tokens,
                rank = ?used,
                cuts = cuts.len(),
                "Splitting span"
            );

            let next = used.finer().unwrap_or(used);
            let packed = self.pack(&span, &cuts)?;
            // Reversed so the leftmost piece is popped first
            pending.extend(packed.into_iter().rev().map(|piece| (piece, next)));
        }

        Ok(pieces)
    }

    /// Cut points of the coarsest rank, no coarser than `rank`, that has any
    /// inside the span.
    fn coarsest_cuts(&self, span: &Span, rank: BoundaryRank) -> Option<(BoundaryRank, Vec<usize>)> {
        BoundaryRank::ALL
            .into_iter()
            .filter(|r| *r >= rank)
            .find_map(|r| {
                let cuts = self
                    .boundaries
                    .cut_points(self.text, span.start, span.end, r);
                (!cuts.is_empty()).then_some((r, cuts))
            })
    }

    /// Greedily merge the units between consecutive cut points into pieces
    /// that fit the budget. A unit that alone exceeds it becomes its own
    /// piece.
    fn pack(&self, span: &Span, cuts: &[usize]) -> Result<Vec<Span>> {
        let ends: Vec<usize> = cuts.iter().copied().chain(iter::once(span.end)).collect();

        let mut pieces = Vec::new();
        let mut start = span.start;
        let mut last_fit: Option<(usize, usize)> = None;
        let mut i = 0;

        while i < ends.len() {
            let end = ends[i];
            let tokens = self.tokenizer.count_tokens(&self.text[start..end])?;

            if tokens <= self.budget {
                last_fit = Some((end, tokens));
                i += 1;
                continue;
            }

            match last_fit.take() {
                Some((fit_end, fit_tokens)) => {
                    // Close at the last cut that fit, then retry this unit
                    pieces.push(Span::with_count(start, fit_end, fit_tokens));
                    start = fit_end;
                }
                None => {
                    pieces.push(Span::with_count(start, end, tokens));
                    start = end;
                    i += 1;
                }
            }
        }

        if let Some((end, tokens)) = last_fit {
            pieces.push(Span::with_count(start, end, tokens));
        }

        Ok(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::boundary::BoundaryClassifier;
    use crate::chunking::tokenizer::CharTokenizer;
    use pretty_assertions::assert_eq;
    use semchunk_config::BoundaryConfig;

    fn split(text: &str, budget: usize, rank: BoundaryRank) -> Vec<String> {
        let map = BoundaryClassifier::new(&BoundaryConfig::default()).classify(text);
        let tokenizer = CharTokenizer;
        let splitter = Splitter::new(text, &map, &tokenizer, budget);
        splitter
            .split(Span::new(0, text.len()), rank)
            .unwrap()
            .iter()
            .map(|s| s.text(text).to_string())
            .collect()
    }

    #[test]
    fn test_fitting_span_is_untouched() {
        let text = "Exactly ten";
        assert_eq!(split(text, text.chars().count(), BoundaryRank::Heading), vec![text]);
    }

    #[test]
    fn test_empty_span_yields_nothing() {
        assert!(split("", 4, BoundaryRank::Heading).is_empty());
    }

    #[test]
    fn test_prefers_paragraph_breaks() {
        let text = "First block here.\n\nSecond block.";
        let pieces = split(text, 20, BoundaryRank::Heading);
        assert_eq!(pieces, vec!["First block here.\n\n", "Second block."]);
    }

    #[test]
    fn test_heading_starts_a_piece() {
        let text = "Intro.\n# Part\nBody text.";
        let pieces = split(text, 17, BoundaryRank::Heading);
        assert_eq!(pieces, vec!["Intro.\n", "# Part\nBody text."]);
    }

    #[test]
    fn test_packs_sentences_greedily() {
        let text = "One. Two. Three. Four.";
        let pieces = split(text, 10, BoundaryRank::Heading);
        assert_eq!(pieces, vec!["One. Two. ", "Three. ", "Four."]);
    }

    #[test]
    fn test_falls_back_to_words_then_characters() {
        let text = "tiny extraordinarily";
        let pieces = split(text, 6, BoundaryRank::Heading);
        assert_eq!(pieces, vec!["tiny ", "extrao", "rdinar", "ily"]);
        assert_eq!(pieces.concat(), text);
    }

    #[test]
    fn test_single_character_may_exceed_budget() {
        let map = BoundaryMap::default();
        let tokenizer = CharTokenizer;
        let text = "x";
        let splitter = Splitter::new(text, &map, &tokenizer, 0);
        let pieces = splitter.split(Span::new(0, 1), BoundaryRank::Heading).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].text(text), "x");
    }

    #[test]
    fn test_split_strategy_ignores_structure() {
        let text = "Aa.\n\nBb cc dd ee";
        let hierarchical = split(text, 10, initial_rank(SplitStrategy::Hierarchical));
        let words = split(text, 10, initial_rank(SplitStrategy::Split));
        assert_eq!(hierarchical, vec!["Aa.\n\n", "Bb cc dd ", "ee"]);
        assert_eq!(words, vec!["Aa.\n\nBb ", "cc dd ee"]);
    }

    #[test]
    fn test_pieces_cover_input() {
        let text = "# Title\n\nAlpha beta gamma. Delta epsilon!\n\n## Next\nZeta eta theta iota kappa.";
        for budget in [1, 3, 7, 12, 40, 200] {
            let pieces = split(text, budget, BoundaryRank::Heading);
            assert_eq!(pieces.concat(), text, "budget {budget}");
            for piece in &pieces {
                assert!(
                    piece.chars().count() <= budget.max(1),
                    "budget {budget}: {piece:?}"
                );
            }
        }
    }
}
