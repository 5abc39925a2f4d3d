//! Chunking of mixed Chinese text.
//!
//! This module splits text into typed chunks: maximal Han runs (which the
//! segmenter then breaks into words), Latin and numeral runs, and single
//! punctuation, space and other characters.

use crate::char_categories::{CharCategory, ZhString};
use crate::token::ChunkType;

/// A chunk of text with its type and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The type of this chunk
    pub chunk_type: ChunkType,
    /// Starting byte offset in the original string
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Length in characters
    pub char_len: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(chunk_type: ChunkType, start: usize, len: usize, char_len: usize) -> Self {
        Chunk {
            chunk_type,
            start,
            len,
            char_len,
        }
    }

    /// The slice of `source` covered by this chunk
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.start + self.len]
    }
}

/// Chunker for Chinese text
pub struct Chunker {
    /// The analyzed string
    zs: ZhString,
}

impl Chunker {
    /// Create a new chunker for the given string
    pub fn new(text: &str) -> Self {
        Chunker {
            zs: ZhString::new(text),
        }
    }

    /// Chunk the text into Han runs, Latin runs, punctuation, etc.
    pub fn make_chunks(&self) -> Vec<Chunk> {
        if self.zs.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let chars: Vec<char> = self.zs.string.chars().collect();
        let mut byte_positions: Vec<usize> = Vec::with_capacity(self.zs.len() + 1);

        let mut pos = 0;
        for c in &chars {
            byte_positions.push(pos);
            pos += c.len_utf8();
        }
        byte_positions.push(pos);

        let mut i = 0;
        while i < chars.len() {
            let cat = self.zs.categories[i];

            let (chunk_type, next_i) = match cat {
                CharCategory::Han => (ChunkType::Han, self.read_run(i, cat)),
                CharCategory::Latin => (ChunkType::Latin, self.read_run(i, cat)),
                CharCategory::Numeral => (ChunkType::Num, self.read_run(i, cat)),
                CharCategory::Punct => (ChunkType::Punct, self.skip_marks(i + 1)),
                CharCategory::Transparent => (ChunkType::Space, self.skip_marks(i + 1)),
                CharCategory::Mark | CharCategory::Other => {
                    (ChunkType::Other, self.skip_marks(i + 1))
                }
            };

            let start = byte_positions[i];
            let end = byte_positions[next_i];
            chunks.push(Chunk::new(chunk_type, start, end - start, next_i - i));
            i = next_i;
        }

        chunks
    }

    /// Index one past the run of `cat` characters starting at `start_i`.
    /// Combining marks inside the run belong to it.
    fn read_run(&self, start_i: usize, cat: CharCategory) -> usize {
        let mut i = start_i + 1;
        while let Some(next) = self.zs.get_category(i) {
            if next != cat && next != CharCategory::Mark {
                break;
            }
            i += 1;
        }
        i
    }

    fn skip_marks(&self, mut i: usize) -> usize {
        while self.zs.get_category(i) == Some(CharCategory::Mark) {
            i += 1;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_han_run() {
        let chunker = Chunker::new("忘拿一些东西了");
        let chunks = chunker.make_chunks();

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].chunk_type, ChunkType::Han);
        assert_eq!(chunks[0].char_len, 7);
    }

    #[test]
    fn test_with_punctuation() {
        let text = "你想做，就照做";
        let chunker = Chunker::new(text);
        let chunks = chunker.make_chunks();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text(text), "你想做");
        assert_eq!(chunks[1].chunk_type, ChunkType::Punct);
        assert_eq!(chunks[1].text(text), "，");
        assert_eq!(chunks[2].text(text), "就照做");
    }

    #[test]
    fn test_mixed_content() {
        let text = "我有mp3 播放器！！";
        let chunker = Chunker::new(text);
        let chunks = chunker.make_chunks();

        let types: Vec<ChunkType> = chunks.iter().map(|c| c.chunk_type).collect();
        assert_eq!(
            types,
            vec![
                ChunkType::Han,
                ChunkType::Latin,
                ChunkType::Space,
                ChunkType::Han,
                ChunkType::Punct,
                ChunkType::Punct,
            ]
        );
        assert_eq!(chunks[1].text(text), "mp3");
    }

    #[test]
    fn test_combining_marks_stay_with_base() {
        let text = "cafe\u{301}，A\u{30A}";
        let chunks = Chunker::new(text).make_chunks();

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chunk_type, ChunkType::Latin);
        assert_eq!(chunks[0].text(text), "cafe\u{301}");
        assert_eq!(chunks[2].text(text), "A\u{30A}");
        assert_eq!(chunks[2].char_len, 2);
    }

    #[test]
    fn test_leading_mark() {
        let text = "\u{301}你";
        let chunks = Chunker::new(text).make_chunks();
        assert_eq!(chunks[0].chunk_type, ChunkType::Other);
        assert_eq!(chunks[0].text(text), "\u{301}");
        assert_eq!(chunks[1].chunk_type, ChunkType::Han);
    }

    #[test]
    fn test_empty() {
        assert!(Chunker::new("").make_chunks().is_empty());
    }
}
