//! Pronunciation dictionaries built from CC-Canto / CC-CEDICT style sources.
//!
//! Each source line gives a traditional and a simplified headword with their
//! Pinyin (and, for CC-Canto, Jyutping) syllables. Loading a line feeds two
//! kinds of maps per romanization system:
//!
//! * a word map, from a word to its raw syllables, used for whole-word lookup;
//! * a character frequency map, counting how often each character was seen
//!   with each pronunciation, used as the per-character fallback.
//!
//! Loading is additive: several sources can be loaded into the same
//! [`DictionaryBuilder`], after which [`DictionaryBuilder::build`] freezes
//! the maps into an immutable [`Dictionary`].

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SkipReason;
use crate::segmenter::Segmenter;
use crate::tone::RomanizationSystem;
use crate::trie::TrieBuilder;

/// Word → raw syllables, one per character
pub type WordMap = HashMap<String, Vec<String>>;

/// Character → how often each pronunciation was seen
pub type CharFrequencyMap = HashMap<char, PronunciationCounts>;

/// Line that some CC-Canto releases carry in their header without a `#`
pub const BOILERPLATE_LINE: &str = "and add boilerplate:";

/// Characters removed from headwords before pairing them with syllables
const ALIGNMENT_PUNCT: [char; 3] = [',', '，', ' '];

static CANTO_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+\[([^\]]*)\]\s+\{([^}]*)\}\s*(.*)$")
        .expect("valid cc-canto regex")
});

static CEDICT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s+(\S+)\s+\[([^\]]*)\]\s+/([^/]*)/.*$").expect("valid cc-cedict regex")
});

/// Grammar of a dictionary source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// `TRAD SIMP [pinyin] {jyutping} /definition/` (CC-Canto and the
    /// Cantonese readings file for CC-CEDICT)
    CcCanto,
    /// `TRAD SIMP [pinyin] /definition/.../` (CC-CEDICT, Pinyin only)
    CcCedict,
}

/// A parsed dictionary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntry {
    pub traditional: String,
    pub simplified: String,
    /// Space-separated Pinyin syllables, as in the source
    pub pinyin: String,
    /// Space-separated Jyutping syllables (CC-Canto only)
    pub jyutping: Option<String>,
    pub definition: String,
}

/// Parse one source line.
///
/// Comments, blank lines and the boilerplate marker come back as the matching
/// [`SkipReason`]; a line that does not follow the grammar is logged and
/// returned as [`SkipReason::Malformed`].
pub fn parse_line(line: &str, format: SourceFormat) -> Result<DictEntry, SkipReason> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(SkipReason::Blank);
    }
    if line.starts_with('#') {
        return Err(SkipReason::Comment);
    }
    if line == BOILERPLATE_LINE {
        return Err(SkipReason::Boilerplate);
    }

    let entry = match format {
        SourceFormat::CcCanto => CANTO_LINE.captures(line).map(|caps| DictEntry {
            traditional: caps[1].to_string(),
            simplified: caps[2].to_string(),
            pinyin: caps[3].to_string(),
            jyutping: Some(caps[4].to_string()),
            definition: caps[5].trim().to_string(),
        }),
        SourceFormat::CcCedict => CEDICT_LINE.captures(line).map(|caps| DictEntry {
            traditional: caps[1].to_string(),
            simplified: caps[2].to_string(),
            pinyin: caps[3].to_string(),
            jyutping: None,
            definition: caps[4].to_string(),
        }),
    };

    entry.ok_or_else(|| {
        info!("malformed dictionary line: {}", line);
        SkipReason::Malformed
    })
}

fn strip_alignment_punct(word: &str) -> String {
    word.chars().filter(|c| !ALIGNMENT_PUNCT.contains(c)).collect()
}

/// Pronunciation counts of one character, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronunciationCounts {
    entries: Vec<(String, u32)>,
}

impl PronunciationCounts {
    /// Count one more sighting of `syllable`
    pub fn increment(&mut self, syllable: &str) {
        self.add(syllable, 1);
    }

    fn add(&mut self, syllable: &str, count: u32) {
        match self.entries.iter_mut().find(|(s, _)| s == syllable) {
            Some((_, c)) => *c += count,
            None => self.entries.push((syllable.to_string(), count)),
        }
    }

    /// How often `syllable` was seen
    pub fn count(&self, syllable: &str) -> u32 {
        self.entries
            .iter()
            .find(|(s, _)| s == syllable)
            .map_or(0, |(_, c)| *c)
    }

    /// The most frequent pronunciation; the earliest seen wins a tie
    pub fn most_frequent(&self) -> Option<&str> {
        let mut best: Option<&(String, u32)> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(s, _)| s.as_str())
    }

    /// Pronunciations with their counts, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add the counts of `other`; new pronunciations go to the end
    pub fn merge(&mut self, other: &PronunciationCounts) {
        for (syllable, count) in &other.entries {
            self.add(syllable, *count);
        }
    }
}

/// Word and character maps of one romanization system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RomanizationMaps {
    pub words: WordMap,
    pub chars: CharFrequencyMap,
}

impl RomanizationMaps {
    pub fn new() -> Self {
        RomanizationMaps::default()
    }

    /// Raw syllables of a word
    pub fn word(&self, word: &str) -> Option<&[String]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// Most frequent raw syllable of a character
    pub fn top_pronunciation(&self, c: char) -> Option<&str> {
        self.chars.get(&c).and_then(PronunciationCounts::most_frequent)
    }

    /// Fold maps built separately (for instance from another source file)
    /// into these ones. Words from `other` replace existing entries.
    pub fn merge(&mut self, other: RomanizationMaps) {
        self.words.extend(other.words);
        for (c, counts) in other.chars {
            self.chars.entry(c).or_default().merge(&counts);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.chars.is_empty()
    }
}

/// Count every character of `word` against its syllable in `romanization`.
///
/// Syllables are lower-cased before counting. Returns the number of
/// characters counted.
pub fn build_character_map(
    word: &str,
    romanization: &str,
    target: &mut CharFrequencyMap,
) -> Result<usize, SkipReason> {
    let chars: Vec<char> = strip_alignment_punct(word).chars().collect();
    let syllables: Vec<&str> = romanization.split_whitespace().collect();

    if chars.len() != syllables.len() {
        return Err(SkipReason::LengthMismatch {
            chars: chars.len(),
            syllables: syllables.len(),
        });
    }

    for (c, syllable) in chars.iter().zip(&syllables) {
        target
            .entry(*c)
            .or_default()
            .increment(&syllable.to_lowercase());
    }
    Ok(chars.len())
}

/// Split `word` into sub-words with `segmenter` and pair each with its slice
/// of `romanization`.
///
/// A long entry such as `没有什么` yields `没有` and `什么` as separate words.
pub fn build_word_map(
    word: &str,
    romanization: &str,
    segmenter: &dyn Segmenter,
) -> Result<Vec<(String, Vec<String>)>, SkipReason> {
    let word = strip_alignment_punct(word);
    let romanization: String = romanization
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();
    let syllables: Vec<&str> = romanization.split_whitespace().collect();

    let char_count = word.chars().count();
    if char_count != syllables.len() {
        return Err(SkipReason::LengthMismatch {
            chars: char_count,
            syllables: syllables.len(),
        });
    }

    let mut entries = Vec::new();
    let mut index = 0;
    for sub_word in segmenter.segment(&word) {
        let len = sub_word.chars().count();
        let slice = syllables
            .get(index..index + len)
            .ok_or(SkipReason::LengthMismatch {
                chars: index + len,
                syllables: syllables.len(),
            })?;
        entries.push((sub_word, slice.iter().map(|s| s.to_string()).collect()));
        index += len;
    }
    Ok(entries)
}

/// Add the headwords of a source to a segmentation vocabulary
pub fn collect_headwords(content: &str, format: SourceFormat, builder: &mut TrieBuilder) {
    for line in content.lines() {
        if let Ok(entry) = parse_line(line, format) {
            builder.add_word(&strip_alignment_punct(&entry.traditional));
            builder.add_word(&strip_alignment_punct(&entry.simplified));
        }
    }
}

/// What happened to the lines of one [`DictionaryBuilder::load`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub lines: usize,
    /// Lines that parsed and were applied to the maps
    pub entries: usize,
    pub comments: usize,
    pub blank: usize,
    pub boilerplate: usize,
    pub malformed: usize,
    /// Headword/syllable pairings discarded because the counts disagree
    pub mismatches: usize,
}

/// The frozen maps of both romanization systems
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    pinyin: RomanizationMaps,
    jyutping: RomanizationMaps,
}

impl Dictionary {
    pub fn new(pinyin: RomanizationMaps, jyutping: RomanizationMaps) -> Self {
        Dictionary { pinyin, jyutping }
    }

    /// The maps for `system`
    pub fn maps(&self, system: RomanizationSystem) -> &RomanizationMaps {
        match system {
            RomanizationSystem::Pinyin => &self.pinyin,
            RomanizationSystem::Jyutping => &self.jyutping,
        }
    }

    pub fn pinyin(&self) -> &RomanizationMaps {
        &self.pinyin
    }

    pub fn jyutping(&self) -> &RomanizationMaps {
        &self.jyutping
    }

    pub fn is_empty(&self) -> bool {
        self.pinyin.is_empty() && self.jyutping.is_empty()
    }
}

/// Accumulates dictionary sources into word and character maps
pub struct DictionaryBuilder {
    segmenter: Arc<dyn Segmenter>,
    pinyin: RomanizationMaps,
    jyutping: RomanizationMaps,
}

impl DictionaryBuilder {
    /// Create a builder that splits headwords with `segmenter`
    pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
        DictionaryBuilder {
            segmenter,
            pinyin: RomanizationMaps::new(),
            jyutping: RomanizationMaps::new(),
        }
    }

    /// Load every line of a source
    pub fn load(&mut self, content: &str, format: SourceFormat) -> LoadStats {
        let mut stats = LoadStats::default();

        for line in content.lines() {
            stats.lines += 1;
            match parse_line(line, format) {
                Ok(entry) => {
                    stats.entries += 1;
                    stats.mismatches += self.apply_entry(&entry);
                }
                Err(SkipReason::Comment) => stats.comments += 1,
                Err(SkipReason::Blank) => stats.blank += 1,
                Err(SkipReason::Boilerplate) => stats.boilerplate += 1,
                Err(SkipReason::Malformed) => stats.malformed += 1,
                Err(SkipReason::LengthMismatch { .. }) => stats.mismatches += 1,
            }
        }

        debug!("loaded {:?} source: {:?}", format, stats);
        stats
    }

    /// Parse and apply a single line
    pub fn process_line(&mut self, line: &str, format: SourceFormat) -> Result<DictEntry, SkipReason> {
        let entry = parse_line(line, format)?;
        self.apply_entry(&entry);
        Ok(entry)
    }

    /// Feed both headword forms of `entry` into the maps.
    ///
    /// Returns how many pairings were discarded for a length mismatch.
    pub fn apply_entry(&mut self, entry: &DictEntry) -> usize {
        let mut mismatches = 0;
        let trad = entry.traditional.as_str();
        let simp = entry.simplified.as_str();

        if let Some(ref jyutping) = entry.jyutping {
            for word in [trad, simp] {
                mismatches += self.add_words(RomanizationSystem::Jyutping, word, jyutping);
            }
        }
        for word in [simp, trad] {
            mismatches += self.add_words(RomanizationSystem::Pinyin, word, &entry.pinyin);
        }

        if let Some(ref jyutping) = entry.jyutping {
            for word in [trad, simp] {
                mismatches += self.add_chars(RomanizationSystem::Jyutping, word, jyutping);
            }
        }
        for word in [simp, trad] {
            mismatches += self.add_chars(RomanizationSystem::Pinyin, word, &entry.pinyin);
        }

        mismatches
    }

    fn maps_mut(&mut self, system: RomanizationSystem) -> &mut RomanizationMaps {
        match system {
            RomanizationSystem::Pinyin => &mut self.pinyin,
            RomanizationSystem::Jyutping => &mut self.jyutping,
        }
    }

    fn add_words(&mut self, system: RomanizationSystem, word: &str, romanization: &str) -> usize {
        match build_word_map(word, romanization, self.segmenter.as_ref()) {
            Ok(entries) => {
                self.maps_mut(system).words.extend(entries);
                0
            }
            Err(reason) => {
                debug!("{} words of [{}] [{}]: {}", system.as_str(), word, romanization, reason);
                1
            }
        }
    }

    fn add_chars(&mut self, system: RomanizationSystem, word: &str, romanization: &str) -> usize {
        match build_character_map(word, romanization, &mut self.maps_mut(system).chars) {
            Ok(_) => 0,
            Err(reason) => {
                debug!("{} chars of [{}] [{}]: {}", system.as_str(), word, romanization, reason);
                1
            }
        }
    }

    /// The Pinyin maps built so far
    pub fn pinyin(&self) -> &RomanizationMaps {
        &self.pinyin
    }

    /// The Jyutping maps built so far
    pub fn jyutping(&self) -> &RomanizationMaps {
        &self.jyutping
    }

    /// Merge partial maps built elsewhere (e.g. on another thread)
    pub fn merge(&mut self, dictionary: Dictionary) {
        self.pinyin.merge(dictionary.pinyin);
        self.jyutping.merge(dictionary.jyutping);
    }

    /// Freeze the maps
    pub fn build(self) -> Dictionary {
        Dictionary::new(self.pinyin, self.jyutping)
    }
}
