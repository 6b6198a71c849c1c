use serde::{Deserialize, Serialize};

/// One unit of chunker output.
///
/// `text` is the overlap prefix followed by the core content. Offsets locate
/// the core content in the normalized text and are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the output sequence, starting at 0
    pub index: usize,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    /// Tokens in `text`, overlap included
    pub token_count: usize,
    /// Byte length of the overlap prefix at the start of `text`
    #[serde(default)]
    pub overlap_len: usize,
    #[serde(default)]
    pub overlap_token_count: usize,
}

impl Chunk {
    /// Content this chunk owns, without the prefix borrowed from the previous
    /// chunk.
    ///
    /// A deserialized chunk whose `overlap_len` is not a char boundary inside
    /// `text` is treated as having no overlap.
    pub fn core_text(&self) -> &str {
        self.text.get(self.overlap_len..).unwrap_or(&self.text)
    }

    pub fn overlap_text(&self) -> &str {
        self.text.get(..self.overlap_len).unwrap_or("")
    }

    pub fn has_overlap(&self) -> bool {
        !self.overlap_text().is_empty()
    }
}

/// Chunk tagged with the page and document it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChunk {
    pub page: usize,
    pub source: String,
    #[serde(flatten)]
    pub chunk: Chunk,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Chunk {
        Chunk {
            index: 1,
            text: "tail. Next part".to_string(),
            start_offset: 20,
            end_offset: 29,
            token_count: 4,
            overlap_len: 6,
            overlap_token_count: 2,
        }
    }

    #[test]
    fn test_core_and_overlap_text() {
        let chunk = sample();
        assert_eq!(chunk.overlap_text(), "tail. ");
        assert_eq!(chunk.core_text(), "Next part");
        assert!(chunk.has_overlap());
        assert_eq!(chunk.core_text().len(), chunk.end_offset - chunk.start_offset);
    }

    #[test]
    fn test_bad_overlap_len_does_not_panic() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["overlap_len"] = 99.into();
        let past_end: Chunk = serde_json::from_value(value).unwrap();
        assert_eq!(past_end.core_text(), "tail. Next part");
        assert_eq!(past_end.overlap_text(), "");
        assert!(!past_end.has_overlap());

        let mid_char = Chunk {
            text: "é then more".to_string(),
            overlap_len: 1,
            ..sample()
        };
        assert_eq!(mid_char.core_text(), "é then more");
        assert_eq!(mid_char.overlap_text(), "");
    }

    #[test]
    fn test_page_chunk_serializes_flat() {
        let page_chunk = PageChunk {
            page: 3,
            source: "report.pdf".to_string(),
            chunk: sample(),
        };
        let value = serde_json::to_value(&page_chunk).unwrap();
        assert_eq!(value["page"], 3);
        assert_eq!(value["source"], "report.pdf");
        assert_eq!(value["index"], 1);
        assert_eq!(value["token_count"], 4);

        let back: PageChunk = serde_json::from_value(value).unwrap();
        assert_eq!(back, page_chunk);
    }
}
