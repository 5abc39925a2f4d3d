//! # pinyin-jyutping
//!
//! Convert Chinese sentences to Mandarin Pinyin or Cantonese Jyutping.
//!
//! Pronunciations come from CC-CEDICT / CC-Canto style dictionary sources.
//! A sentence is segmented into words; a word found in the dictionary is
//! romanized as a whole, anything else character by character using the most
//! frequent reading of each character.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use pinyin_jyutping::{RomanizationOptions, Romanizer, Segmenter, SourceFormat, TrieBuilder, TrieSegmenter};
//!
//! // Segmentation vocabulary (jieba word list format)
//! let mut words = TrieBuilder::new();
//! words.load_word_list("东西 1000 n\n一些 800 m");
//! let segmenter: Arc<dyn Segmenter> = Arc::new(TrieSegmenter::new(words.build()));
//!
//! // Pronunciation dictionary
//! let mut builder = Romanizer::builder(Arc::clone(&segmenter));
//! builder.load("東西 东西 [dong1 xi5] {dung1 sai1} /thing/", SourceFormat::CcCanto);
//! let romanizer = Romanizer::new(builder.build(), segmenter);
//!
//! let options = RomanizationOptions::default();
//! assert_eq!(romanizer.pinyin("东西", &options).unwrap(), "dōngxi");
//! assert_eq!(romanizer.jyutping("东西", &options).unwrap(), "dūngsāi");
//! ```
//!
//! ## Tone decoding only
//!
//! ```rust
//! use pinyin_jyutping::{decode_jyutping, decode_pinyin, ToneStyle};
//!
//! assert_eq!(decode_pinyin("lu:4", ToneStyle::Marks).unwrap(), "lǜ");
//! assert_eq!(decode_jyutping("nei5", ToneStyle::Marks), "něi");
//! ```
//!
//! ## Python Bindings
//!
//! With the `python` feature the crate builds as a Python extension module.

pub mod char_categories;
pub mod chunker;
pub mod dictionary;
pub mod error;
pub mod resolver;
pub mod romanizer;
pub mod segmenter;
pub mod token;
pub mod tone;
pub mod trie;

// Python bindings (only compiled when the "python" feature is enabled)
#[cfg(feature = "python")]
pub mod python;

// Re-export main types for convenience
pub use char_categories::{canonical_char, get_char_category, is_han, CharCategory, ZhString};
pub use chunker::{Chunk, Chunker};
pub use dictionary::{
    build_character_map, build_word_map, collect_headwords, parse_line, CharFrequencyMap,
    DictEntry, Dictionary, DictionaryBuilder, LoadStats, PronunciationCounts, RomanizationMaps,
    SourceFormat, WordMap,
};
pub use error::{Error, Result, SkipReason};
pub use resolver::resolve;
pub use romanizer::{RomanizationOptions, Romanizer};
#[cfg(feature = "jieba")]
pub use segmenter::JiebaSegmenter;
pub use segmenter::{CharSegmenter, Segmenter, TrieSegmenter};
pub use token::{ChunkType, Token};
pub use tone::{decode_jyutping, decode_pinyin, strip_tone_digits, RomanizationSystem, ToneStyle};
pub use trie::{Trie, TrieBuilder, TrieNode, WordData};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_full_pipeline() {
        let source = "一些 一些 [yi1 xie1] /some/\n\
                      東西 东西 [dong1 xi5] /thing/\n\
                      忘 忘 [wang4] /to forget/\n\
                      拿 拿 [na2] /to hold/\n\
                      了 了 [le5] /particle/";

        let mut words = TrieBuilder::new();
        collect_headwords(source, SourceFormat::CcCedict, &mut words);
        let segmenter: Arc<dyn Segmenter> = Arc::new(TrieSegmenter::new(words.build()));

        let mut builder = Romanizer::builder(Arc::clone(&segmenter));
        let stats = builder.load(source, SourceFormat::CcCedict);
        assert_eq!(stats.entries, 5);

        let romanizer = Romanizer::new(builder.build(), segmenter);
        let options = RomanizationOptions::default();
        assert_eq!(
            romanizer.pinyin("忘拿一些东西了", &options).unwrap(),
            "wàng ná yīxiē dōngxi le"
        );
    }

    #[test]
    fn test_char_segmenter_pipeline() {
        let segmenter: Arc<dyn Segmenter> = Arc::new(CharSegmenter);
        let mut builder = Romanizer::builder(Arc::clone(&segmenter));
        builder.load("你好 你好 [ni3 hao3] {nei5 hou2} /hello/", SourceFormat::CcCanto);
        let romanizer = Romanizer::new(builder.build(), segmenter);

        let options = RomanizationOptions::default();
        assert_eq!(romanizer.jyutping("你好！", &options).unwrap(), "něi hóu ！");
    }
}
