//! Token representation for segmented Chinese text.
//!
//! A Token is one unit produced by segmentation: a dictionary word, an unknown
//! Han character, a run of Latin text, a punctuation mark or a space.

use serde::{Deserialize, Serialize};

/// The type of chunk/token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChunkType {
    /// Han text (words or single characters)
    #[default]
    Han,
    /// Punctuation
    Punct,
    /// Number
    Num,
    /// Latin text
    Latin,
    /// Whitespace
    Space,
    /// Other/unknown
    Other,
}

impl ChunkType {
    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::Han => "HAN",
            ChunkType::Punct => "PUNCT",
            ChunkType::Num => "NUM",
            ChunkType::Latin => "LATIN",
            ChunkType::Space => "SPACE",
            ChunkType::Other => "OTHER",
        }
    }
}

/// A single token from segmentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The raw text of the token
    pub text: String,

    /// Starting byte offset in the input
    pub start: usize,

    /// Length in bytes
    pub len: usize,

    /// The type of this token
    pub chunk_type: ChunkType,

    /// Word frequency from the segmentation vocabulary
    pub freq: Option<u32>,

    /// Tag from the segmentation vocabulary (jieba-style POS letter)
    pub tag: Option<String>,

    /// Whether the token was found in the vocabulary
    pub known: bool,
}

impl Token {
    /// Create a token with text and position
    pub fn with_text(text: String, start: usize, len: usize, chunk_type: ChunkType) -> Self {
        Token {
            text,
            start,
            len,
            chunk_type,
            ..Default::default()
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)?;
        if let Some(ref tag) = self.tag {
            write!(f, "/{}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::with_text("东西".to_string(), 0, 6, ChunkType::Han);
        assert_eq!(token.text, "东西");
        assert_eq!(token.chunk_type, ChunkType::Han);
        assert_eq!(token.chunk_type.as_str(), "HAN");
        assert!(!token.known);
    }

    #[test]
    fn test_token_display() {
        let mut token = Token::with_text("东西".to_string(), 0, 6, ChunkType::Han);
        token.tag = Some("n".to_string());
        assert_eq!(format!("{}", token), "东西/n");
    }
}
