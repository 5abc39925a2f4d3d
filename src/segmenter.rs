//! Word segmentation.
//!
//! Romanization is word-driven, so both the dictionary loader and the
//! sentence pipeline need a way to cut Chinese text into words. The
//! [`Segmenter`] trait is that seam; this module provides a longest-match
//! segmenter over a [`Trie`], a per-character fallback, and (with the `jieba`
//! feature) an adapter over `jieba-rs`.

use std::sync::Arc;

use crate::char_categories::canonical_char;
use crate::chunker::{Chunk, Chunker};
use crate::token::{ChunkType, Token};
use crate::trie::{Trie, TrieNode};

/// Cuts text into an ordered sequence of word tokens.
///
/// Implementations must be deterministic for a given vocabulary and must
/// return tokens whose concatenation covers the input.
pub trait Segmenter: Send + Sync {
    /// Split `text` into word tokens
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Longest-match segmenter driven by a word trie
pub struct TrieSegmenter {
    trie: Arc<Trie>,
}

impl TrieSegmenter {
    /// Create a new segmenter with the given trie
    pub fn new(trie: Trie) -> Self {
        TrieSegmenter { trie: Arc::new(trie) }
    }

    /// Create a new segmenter with a shared trie reference
    pub fn with_arc(trie: Arc<Trie>) -> Self {
        TrieSegmenter { trie }
    }

    /// Get a reference to the trie
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Tokenize a string. Token texts are slices of `text`.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chunks = Chunker::new(text).make_chunks();
        self.tokenize_chunks(&chunks, text)
    }

    /// Tokenize pre-chunked text
    pub fn tokenize_chunks(&self, chunks: &[Chunk], original_text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for chunk in chunks {
            if chunk.chunk_type != ChunkType::Han {
                tokens.push(Token::with_text(
                    chunk.text(original_text).to_string(),
                    chunk.start,
                    chunk.len,
                    chunk.chunk_type,
                ));
                continue;
            }

            let run = chunk.text(original_text);
            let mut offset = 0;
            while offset < run.len() {
                let token = self.longest_match(&run[offset..], chunk.start + offset);
                offset += token.len;
                tokens.push(token);
            }
        }

        tokens
    }

    /// Find the longest word at the start of `text`, which must not be empty
    fn longest_match(&self, text: &str, start: usize) -> Token {
        let mut current_node: Option<&TrieNode> = None;
        let mut last_match: Option<(usize, &TrieNode)> = None;

        for (i, c) in text.char_indices() {
            // Compatibility ideographs match the unified spelling
            let next = self
                .trie
                .walk(c, current_node)
                .or_else(|| canonical_char(c).and_then(|n| self.trie.walk(n, current_node)));
            match next {
                Some(next_node) => {
                    current_node = Some(next_node);
                    if next_node.is_match() {
                        last_match = Some((i + c.len_utf8(), next_node));
                    }
                }
                None => break,
            }
        }

        if let Some((end, node)) = last_match {
            let mut token =
                Token::with_text(text[..end].to_string(), start, end, ChunkType::Han);
            token.known = true;
            if let Some(ref data) = node.data {
                token.freq = data.freq;
                token.tag = data.tag.clone();
            }
            token
        } else {
            // No match found - the first character stands alone
            let end = text.chars().next().map_or(0, char::len_utf8);
            Token::with_text(text[..end].to_string(), start, end, ChunkType::Han)
        }
    }
}

impl Segmenter for TrieSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        self.tokenize(text).into_iter().map(|t| t.text).collect()
    }
}

/// A segmenter without a vocabulary: every Han character is its own word
pub struct CharSegmenter;

impl CharSegmenter {
    /// Tokenize text into single Han characters and non-Han chunks
    pub fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for chunk in Chunker::new(text).make_chunks() {
            let chunk_text = chunk.text(text);
            if chunk.chunk_type == ChunkType::Han {
                for (i, c) in chunk_text.char_indices() {
                    tokens.push(Token::with_text(
                        c.to_string(),
                        chunk.start + i,
                        c.len_utf8(),
                        ChunkType::Han,
                    ));
                }
            } else {
                tokens.push(Token::with_text(
                    chunk_text.to_string(),
                    chunk.start,
                    chunk.len,
                    chunk.chunk_type,
                ));
            }
        }
        tokens
    }
}

impl Segmenter for CharSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        Self::tokenize(text).into_iter().map(|t| t.text).collect()
    }
}

/// Segmenter backed by `jieba-rs`, with HMM discovery of unknown words
#[cfg(feature = "jieba")]
pub struct JiebaSegmenter {
    jieba: Arc<jieba_rs::Jieba>,
    hmm: bool,
}

#[cfg(feature = "jieba")]
impl JiebaSegmenter {
    /// Use jieba's bundled dictionary
    pub fn new() -> Self {
        JiebaSegmenter {
            jieba: Arc::new(jieba_rs::Jieba::new()),
            hmm: true,
        }
    }

    /// Use a custom jieba dictionary (`word freq [tag]` per line)
    pub fn with_dict<R: std::io::BufRead>(dict: &mut R) -> crate::Result<Self> {
        let jieba = jieba_rs::Jieba::with_dict(dict)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(JiebaSegmenter {
            jieba: Arc::new(jieba),
            hmm: true,
        })
    }

    /// Enable or disable HMM discovery of out-of-vocabulary words
    pub fn set_hmm(&mut self, hmm: bool) {
        self.hmm = hmm;
    }
}

#[cfg(feature = "jieba")]
impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jieba")]
impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, self.hmm)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
