//! Character classification for mixed Chinese text.
//!
//! Every character of an input sentence is put into a coarse category (Han
//! ideograph, Latin letter, numeral, punctuation, ...) so the chunker can
//! decide which runs go through dictionary segmentation and which are passed
//! through untouched.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Character categories used when chunking Chinese text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharCategory {
    /// Han ideograph (CJK unified, extensions, compatibility)
    Han,
    /// Latin letter or ASCII digit (kept together, `mp3`, `A4`)
    Latin,
    /// Non-ASCII numeral (full-width digits and friends)
    Numeral,
    /// Punctuation, ASCII or CJK
    Punct,
    /// Whitespace
    Transparent,
    /// Combining mark; stays with the character before it
    Mark,
    /// Anything else
    #[default]
    Other,
}

/// Punctuation that appears in Chinese text outside the ASCII range
static CJK_PUNCT: Lazy<HashSet<char>> = Lazy::new(|| {
    "、。〃〈〉《》「」『』【】〔〕〖〗〘〙〚〛〜〝〞〟・·‧…—–‐‘’“”！＂＃＄％＆＇（）＊＋，－．／：；＜＝＞？＠［＼］＾＿｀｛｜｝～｟｠｡｢｣､･﹁﹂﹃﹄︰︱︳︴︵︶︷︸︹︺︻︼︽︾︿﹀﹐﹑﹒﹔﹕﹖﹗"
        .chars()
        .collect()
});

/// List of characters that should be treated as transparent (spaces, etc.)
const TRANSPARENT_CHARS: &[char] = &[
    ' ',        // SPACE
    '\t',       // TAB
    '\n',       // NEWLINE
    '\r',       // CARRIAGE RETURN
    '\u{00A0}', // NO-BREAK SPACE
    '\u{2002}', // EN SPACE
    '\u{2003}', // EM SPACE
    '\u{2009}', // THIN SPACE
    '\u{200B}', // ZERO WIDTH SPACE
    '\u{202F}', // NARROW NO-BREAK SPACE
    '\u{3000}', // IDEOGRAPHIC SPACE
    '\u{FEFF}', // ZERO WIDTH NO-BREAK SPACE
];

/// Whether `c` is a Han ideograph
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)       // CJK Unified Ideographs
        || ('\u{3400}'..='\u{4DBF}').contains(&c) // Extension A
        || ('\u{F900}'..='\u{FAFF}').contains(&c) // Compatibility Ideographs
        || ('\u{20000}'..='\u{2FA1F}').contains(&c) // Extensions B-F, Compatibility Supplement
        || c == '\u{3007}' // 〇
}

/// The NFC form of `c` when that is a different single character.
///
/// CJK compatibility ideographs compose to their unified counterpart
/// (U+F900 to U+8C48), which is how most dictionaries spell them.
pub fn canonical_char(c: char) -> Option<char> {
    let mut composed = std::iter::once(c).nfc();
    match (composed.next(), composed.next()) {
        (Some(n), None) if n != c => Some(n),
        _ => None,
    }
}

/// Get the category of a character
pub fn get_char_category(c: char) -> CharCategory {
    // Whitespace first: U+3000 sits inside the CJK symbols block
    if TRANSPARENT_CHARS.contains(&c) || c.is_whitespace() {
        return CharCategory::Transparent;
    }

    if is_han(c) {
        return CharCategory::Han;
    }

    if is_combining_mark(c) {
        return CharCategory::Mark;
    }

    if c.is_ascii_alphanumeric() {
        return CharCategory::Latin;
    }

    if c.is_ascii_punctuation() || CJK_PUNCT.contains(&c) {
        return CharCategory::Punct;
    }

    if c.is_numeric() {
        return CharCategory::Numeral;
    }

    // Latin-1 Supplement and Latin Extended letters (ü, é, ...)
    if c.is_alphabetic() && ('\u{00C0}'..='\u{024F}').contains(&c) {
        return CharCategory::Latin;
    }

    CharCategory::Other
}

/// A string with category information for each character
#[derive(Debug, Clone)]
pub struct ZhString {
    /// The original string
    pub string: String,
    /// Category for each character (by char index)
    pub categories: Vec<CharCategory>,
}

impl ZhString {
    /// Categorize every character of `s`
    pub fn new(s: &str) -> Self {
        let categories: Vec<CharCategory> = s.chars().map(get_char_category).collect();
        ZhString {
            string: s.to_string(),
            categories,
        }
    }

    /// Get the length (number of characters)
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Get the category at a specific char index
    pub fn get_category(&self, idx: usize) -> Option<CharCategory> {
        self.categories.get(idx).copied()
    }
}
