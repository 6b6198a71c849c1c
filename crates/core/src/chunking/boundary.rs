use once_cell::sync::Lazy;
use regex::Regex;
use semchunk_config::BoundaryConfig;
use serde::{Deserialize, Serialize};
use tracing::trace;

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n+").expect("valid regex"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strength of a cut position, coarsest first.
///
/// The derived ordering follows declaration order, so `a < b` means `a` is
/// the stronger boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRank {
    Heading,
    ParagraphBreak,
    SentenceEnd,
    WordBoundary,
    CharacterBoundary,
}

impl BoundaryRank {
    pub const ALL: [BoundaryRank; 5] = [
        BoundaryRank::Heading,
        BoundaryRank::ParagraphBreak,
        BoundaryRank::SentenceEnd,
        BoundaryRank::WordBoundary,
        BoundaryRank::CharacterBoundary,
    ];

    /// Next weaker rank, `None` once character level is reached
    pub fn finer(self) -> Option<Self> {
        match self {
            BoundaryRank::Heading => Some(BoundaryRank::ParagraphBreak),
            BoundaryRank::ParagraphBreak => Some(BoundaryRank::SentenceEnd),
            BoundaryRank::SentenceEnd => Some(BoundaryRank::WordBoundary),
            BoundaryRank::WordBoundary => Some(BoundaryRank::CharacterBoundary),
            BoundaryRank::CharacterBoundary => None,
        }
    }
}

/// A permissible cut position: a byte offset into the normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Boundary {
    pub offset: usize,
    pub rank: BoundaryRank,
}

/// Finds cut positions in normalized text.
#[derive(Debug, Clone)]
pub struct BoundaryClassifier {
    heading: Regex,
}

impl BoundaryClassifier {
    pub fn new(config: &BoundaryConfig) -> Self {
        let marker = regex::escape(&config.heading_marker.to_string());
        // Escaped single character plus fixed classes always compiles
        let heading = Regex::new(&format!(r"(?m)^(?:{})+[^\S\n]", marker))
            .expect("heading pattern is valid");
        Self { heading }
    }

    pub fn classify(&self, text: &str) -> BoundaryMap {
        let len = text.len();
        let interior = |offset: usize| offset > 0 && offset < len;
        let mut boundaries = Vec::new();

        for m in self.heading.find_iter(text) {
            if interior(m.start()) {
                boundaries.push(Boundary {
                    offset: m.start(),
                    rank: BoundaryRank::Heading,
                });
            }
        }

        for m in PARAGRAPH_BREAK.find_iter(text) {
            if interior(m.end()) {
                boundaries.push(Boundary {
                    offset: m.end(),
                    rank: BoundaryRank::ParagraphBreak,
                });
            }
        }

        for m in SENTENCE_END.find_iter(text) {
            let next_is_upper = text[m.end()..]
                .chars()
                .next()
                .map_or(true, char::is_uppercase);
            if next_is_upper && interior(m.end()) {
                boundaries.push(Boundary {
                    offset: m.end(),
                    rank: BoundaryRank::SentenceEnd,
                });
            }
        }

        for m in WHITESPACE.find_iter(text) {
            if m.start() > 0 && interior(m.end()) {
                boundaries.push(Boundary {
                    offset: m.end(),
                    rank: BoundaryRank::WordBoundary,
                });
            }
        }

        boundaries.sort();
        boundaries.dedup();
        // A word boundary only counts where nothing stronger already cuts
        boundaries.dedup_by(|later, kept| {
            later.offset == kept.offset && later.rank == BoundaryRank::WordBoundary
        });

        trace!(count = boundaries.len(), "Classified boundaries");
        BoundaryMap { boundaries }
    }
}

/// Explicit boundaries of one text, sorted by offset then rank.
///
/// Character boundaries are implicit and derived from the text on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryMap {
    boundaries: Vec<Boundary>,
}

impl BoundaryMap {
    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    /// Distinct offsets strictly inside `start..end` whose rank is `rank` or
    /// coarser, in ascending order.
    pub fn cut_points(&self, text: &str, start: usize, end: usize, rank: BoundaryRank) -> Vec<usize> {
        if end <= start {
            return Vec::new();
        }

        if rank == BoundaryRank::CharacterBoundary {
            return text[start..end]
                .char_indices()
                .skip(1)
                .map(|(i, _)| start + i)
                .collect();
        }

        let from = self.boundaries.partition_point(|b| b.offset <= start);
        let to = self.boundaries.partition_point(|b| b.offset < end);

        let mut offsets: Vec<usize> = self.boundaries[from..to]
            .iter()
            .filter(|b| b.rank <= rank)
            .map(|b| b.offset)
            .collect();
        offsets.dedup();
        offsets
    }

    /// Every boundary of `text`, explicit ones plus a character boundary at
    /// each remaining interior character position.
    pub fn covering<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Boundary> + 'a {
        let mut explicit = self.boundaries.iter().copied().peekable();
        text.char_indices().skip(1).flat_map(move |(offset, _)| {
            let mut here = Vec::new();
            while let Some(b) = explicit.next_if(|b| b.offset == offset) {
                here.push(b);
            }
            if here.is_empty() {
                here.push(Boundary {
                    offset,
                    rank: BoundaryRank::CharacterBoundary,
                });
            }
            here
        })
    }
}
