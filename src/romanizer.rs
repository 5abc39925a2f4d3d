//! Sentence-level romanization.
//!
//! [`Romanizer`] ties a frozen [`Dictionary`] to a [`Segmenter`]: a sentence
//! is cut into words, every word is resolved on its own, and the results are
//! joined with single spaces.

use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, DictionaryBuilder};
use crate::error::Result;
use crate::resolver::resolve;
use crate::segmenter::Segmenter;
use crate::tone::{RomanizationSystem, ToneStyle};

/// Output options shared by Pinyin and Jyutping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RomanizationOptions {
    /// Keep the tone digits instead of placing diacritics
    pub tone_numbers: bool,
    /// Put a space between the syllables of a word
    pub spaces: bool,
    /// Drop tones entirely; overrides `tone_numbers`
    pub remove_tones: bool,
}

impl RomanizationOptions {
    pub fn tone_style(&self) -> ToneStyle {
        ToneStyle::from_flags(self.tone_numbers, self.remove_tones)
    }
}

/// The romanization engine
#[derive(Clone)]
pub struct Romanizer {
    dictionary: Arc<Dictionary>,
    segmenter: Arc<dyn Segmenter>,
}

impl Romanizer {
    /// Create a romanizer over a loaded dictionary
    pub fn new(dictionary: Dictionary, segmenter: Arc<dyn Segmenter>) -> Self {
        Romanizer {
            dictionary: Arc::new(dictionary),
            segmenter,
        }
    }

    /// Create a romanizer with a shared dictionary reference
    pub fn with_arc(dictionary: Arc<Dictionary>, segmenter: Arc<dyn Segmenter>) -> Self {
        Romanizer {
            dictionary,
            segmenter,
        }
    }

    /// A dictionary builder that splits headwords with `segmenter`.
    ///
    /// Use the same segmenter for the romanizer so that words in the
    /// dictionary line up with the words found in sentences.
    pub fn builder(segmenter: Arc<dyn Segmenter>) -> DictionaryBuilder {
        DictionaryBuilder::new(segmenter)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn segmenter(&self) -> &dyn Segmenter {
        self.segmenter.as_ref()
    }

    /// Romanize a sentence with the given system
    pub fn romanize(
        &self,
        sentence: &str,
        system: RomanizationSystem,
        options: &RomanizationOptions,
    ) -> Result<String> {
        let words = self.segmenter.segment(sentence);
        debug!("{} [{}] words: {:?}", system.as_str(), sentence, words);

        let maps = self.dictionary.maps(system);
        let romanized = words
            .iter()
            .map(|word| resolve(word, maps, system, options))
            .collect::<Result<Vec<_>>>()?;
        Ok(romanized.join(" "))
    }

    /// Romanize a sentence as Mandarin Pinyin
    pub fn pinyin(&self, sentence: &str, options: &RomanizationOptions) -> Result<String> {
        self.romanize(sentence, RomanizationSystem::Pinyin, options)
    }

    /// Romanize a sentence as Cantonese Jyutping
    pub fn jyutping(&self, sentence: &str, options: &RomanizationOptions) -> Result<String> {
        self.romanize(sentence, RomanizationSystem::Jyutping, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::SourceFormat;
    use crate::segmenter::TrieSegmenter;
    use crate::trie::TrieBuilder;

    const CANTO: &str = "有啲 有啲 [you3 di1] {jau5 di1} /some/\n\
                         好 好 [hao3] {hou2} /good/\n\
                         貴 贵 [gui4] {gwai3} /expensive/\n";

    fn make_romanizer() -> Romanizer {
        let mut words = TrieBuilder::new();
        words.load_word_list("有啲\n");
        let segmenter: Arc<dyn Segmenter> = Arc::new(TrieSegmenter::new(words.build()));

        let mut builder = Romanizer::builder(Arc::clone(&segmenter));
        builder.load(CANTO, SourceFormat::CcCanto);
        Romanizer::new(builder.build(), segmenter)
    }

    #[test]
    fn test_words_joined_with_single_space() {
        let romanizer = make_romanizer();
        let opts = RomanizationOptions::default();
        assert_eq!(romanizer.jyutping("有啲好貴", &opts).unwrap(), "jǎudī hóu gwâi");
        assert_eq!(romanizer.pinyin("有啲好貴", &opts).unwrap(), "yǒudī hǎo guì");
    }

    #[test]
    fn test_spaces_only_inside_words() {
        let romanizer = make_romanizer();
        let opts = RomanizationOptions {
            tone_numbers: true,
            spaces: true,
            ..Default::default()
        };
        assert_eq!(romanizer.jyutping("有啲好貴", &opts).unwrap(), "jau5 di1 hou2 gwai3");
    }

    #[test]
    fn test_options_from_json() {
        let opts: RomanizationOptions = serde_json::from_str(r#"{"remove_tones": true}"#).unwrap();
        assert_eq!(opts.tone_style(), ToneStyle::Removed);
        assert!(!opts.spaces);
    }

    #[test]
    fn test_empty_sentence() {
        let romanizer = make_romanizer();
        assert_eq!(romanizer.pinyin("", &RomanizationOptions::default()).unwrap(), "");
    }

    #[test]
    fn test_shared_across_threads() {
        let romanizer = make_romanizer();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let r = romanizer.clone();
                std::thread::spawn(move || r.jyutping("好貴", &RomanizationOptions::default()).unwrap())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "hóu gwâi");
        }
    }
}
