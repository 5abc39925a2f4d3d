//! Tone decoding for numerically-toned syllables.
//!
//! Dictionary sources store syllables with a trailing tone digit (`ni3`,
//! `jat1`). These functions turn such a syllable into its diacritic form,
//! echo it unchanged, or strip the tone, depending on the [`ToneStyle`].

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The romanization systems the engine can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RomanizationSystem {
    /// Mandarin Hanyu Pinyin
    Pinyin,
    /// Cantonese Jyutping
    Jyutping,
}

impl RomanizationSystem {
    /// Decode one raw syllable with this system's tone rules
    pub fn decode(&self, syllable: &str, style: ToneStyle) -> Result<String> {
        match self {
            RomanizationSystem::Pinyin => decode_pinyin(syllable, style),
            RomanizationSystem::Jyutping => Ok(decode_jyutping(syllable, style)),
        }
    }

    /// Convert to a string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RomanizationSystem::Pinyin => "pinyin",
            RomanizationSystem::Jyutping => "jyutping",
        }
    }
}

/// How tones are rendered in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneStyle {
    /// Diacritics on the vowel (`nǐ`)
    #[default]
    Marks,
    /// The raw syllable with its tone digit (`ni3`)
    Numbers,
    /// No tone information at all (`ni`)
    Removed,
}

impl ToneStyle {
    /// Fold the two caller flags into one style; removal wins over numbers
    pub fn from_flags(tone_numbers: bool, remove_tones: bool) -> Self {
        if remove_tones {
            ToneStyle::Removed
        } else if tone_numbers {
            ToneStyle::Numbers
        } else {
            ToneStyle::Marks
        }
    }
}

/// Vowel identities, in the column order of [`PINYIN_TONES`]
const PINYIN_VOWELS: [char; 7] = ['a', 'o', 'e', 'i', 'u', 'v', 'ü'];

/// Row 0 is the bare vowel, rows 1-4 the four tones. `v` is marked as `ü`.
static PINYIN_TONES: [[char; 7]; 5] = [
    ['a', 'o', 'e', 'i', 'u', 'v', 'ü'],
    ['ā', 'ō', 'ē', 'ī', 'ū', 'ǖ', 'ǖ'],
    ['á', 'ó', 'é', 'í', 'ú', 'ǘ', 'ǘ'],
    ['ǎ', 'ǒ', 'ě', 'ǐ', 'ǔ', 'ǚ', 'ǚ'],
    ['à', 'ò', 'è', 'ì', 'ù', 'ǜ', 'ǜ'],
];

/// Vowel identities, in the row order of [`JYUTPING_TONES`]
const JYUTPING_VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Columns are tones 1-6: macron, acute, circumflex, grave, caron, none
static JYUTPING_TONES: [[char; 6]; 5] = [
    ['ā', 'á', 'â', 'à', 'ǎ', 'a'],
    ['ē', 'é', 'ê', 'è', 'ě', 'e'],
    ['ī', 'í', 'î', 'ì', 'ǐ', 'i'],
    ['ō', 'ó', 'ô', 'ò', 'ǒ', 'o'],
    ['ū', 'ú', 'û', 'ù', 'ǔ', 'u'],
];

static JYUTPING_SYLLABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z]+)([0-9])$").expect("valid jyutping regex"));

fn is_pinyin_vowel(c: char) -> bool {
    PINYIN_VOWELS.contains(&c)
}

/// Remove every tone digit from a syllable
pub fn strip_tone_digits(syllable: &str) -> String {
    syllable.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Decode a Pinyin syllable such as `ni3`, `lu:4` or `er2hua4`.
///
/// Letters are buffered until a tone digit arrives; the digit then marks one
/// vowel of the buffer and the buffer is flushed. Several syllables can
/// follow each other in one string. The vowel to mark is chosen by the usual
/// priority: `a`, then `o`, then `e`, then the second vowel of `ui`/`iu`.
/// A vowel cluster outside those rules gets a `!` appended instead of a mark.
///
/// # Errors
///
/// [`Error::OrphanUmlaut`] when a `:` does not follow a `u`.
pub fn decode_pinyin(syllable: &str, style: ToneStyle) -> Result<String> {
    match style {
        ToneStyle::Removed => return Ok(strip_tone_digits(syllable)),
        ToneStyle::Numbers => return Ok(syllable.to_string()),
        ToneStyle::Marks => {}
    }

    let lower = syllable.to_lowercase();
    let mut result = String::with_capacity(lower.len() + 2);
    let mut buffer: Vec<char> = Vec::with_capacity(8);

    for c in lower.chars() {
        match c {
            'a'..='z' | 'ü' => buffer.push(c),
            ':' => match buffer.last_mut() {
                Some(last) if *last == 'u' => *last = 'ü',
                _ => {
                    return Err(Error::OrphanUmlaut {
                        syllable: syllable.to_string(),
                    })
                }
            },
            '0'..='5' => {
                let tone = c as usize - '0' as usize;
                if tone % 5 != 0 {
                    mark_pinyin_tone(&mut buffer, tone % 5, c);
                }
                result.extend(buffer.drain(..));
            }
            _ => {
                result.extend(buffer.drain(..));
                result.push(c);
            }
        }
    }

    result.extend(buffer);
    Ok(result)
}

/// Put tone `tone` (1-4) on the right vowel of `buffer`
fn mark_pinyin_tone(buffer: &mut Vec<char>, tone: usize, digit: char) {
    let start = match buffer.iter().position(|&c| is_pinyin_vowel(c)) {
        Some(start) => start,
        None => {
            // Nothing to mark (`m2`, `ng4`): keep the number visible
            buffer.push(digit);
            return;
        }
    };
    let end = buffer[start..]
        .iter()
        .position(|&c| !is_pinyin_vowel(c))
        .map_or(buffer.len(), |n| start + n);
    let run = &buffer[start..end];

    let target = if run.len() == 1 {
        Some(start)
    } else {
        ['a', 'o', 'e']
            .iter()
            .find_map(|v| run.iter().position(|c| c == v))
            .map(|i| start + i)
            .or_else(|| {
                if run.ends_with(&['u', 'i']) || run.ends_with(&['i', 'u']) {
                    Some(end - 1)
                } else {
                    None
                }
            })
    };

    match target {
        Some(i) => buffer[i] = toned_pinyin_vowel(buffer[i], tone),
        None => buffer.push('!'),
    }
}

fn toned_pinyin_vowel(vowel: char, tone: usize) -> char {
    PINYIN_VOWELS
        .iter()
        .position(|&v| v == vowel)
        .map_or(vowel, |column| PINYIN_TONES[tone][column])
}

/// Decode a Jyutping syllable such as `nei5` or `jat1`.
///
/// The first vowel of the syllable carries the mark. A syllable that does not
/// end in letters plus a tone digit is returned as is.
pub fn decode_jyutping(syllable: &str, style: ToneStyle) -> String {
    match style {
        ToneStyle::Removed => return strip_tone_digits(syllable),
        ToneStyle::Numbers => return syllable.to_string(),
        ToneStyle::Marks => {}
    }

    let caps = match JYUTPING_SYLLABLE.captures(syllable) {
        Some(caps) => caps,
        None => {
            info!("couldn't parse syllable [{}]", syllable);
            return syllable.to_string();
        }
    };
    let sound = &caps[1];
    let tone = match caps[2].parse::<usize>() {
        Ok(t @ 1..=6) => t,
        _ => {
            info!("tone out of range in syllable [{}]", syllable);
            return syllable.to_string();
        }
    };

    let mut marked = false;
    sound
        .chars()
        .map(|c| {
            if marked {
                return c;
            }
            match JYUTPING_VOWELS.iter().position(|&v| v == c) {
                Some(row) => {
                    marked = true;
                    JYUTPING_TONES[row][tone - 1]
                }
                None => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinyin(s: &str) -> String {
        decode_pinyin(s, ToneStyle::Marks).unwrap()
    }

    fn jyutping(s: &str) -> String {
        decode_jyutping(s, ToneStyle::Marks)
    }

    #[test]
    fn test_decode_pinyin() {
        assert_eq!(pinyin("ni3"), "nǐ");
        assert_eq!(pinyin("hao3"), "hǎo");
        assert_eq!(pinyin("wang4"), "wàng");
        assert_eq!(pinyin("xiong2"), "xióng");
        assert_eq!(pinyin("xue2"), "xué");
        assert_eq!(pinyin("gui4"), "guì");
        assert_eq!(pinyin("liu2"), "liú");
        assert_eq!(pinyin("er2"), "ér");
    }

    #[test]
    fn test_decode_pinyin_neutral_tone() {
        assert_eq!(pinyin("le5"), "le");
        assert_eq!(pinyin("xi0"), "xi");
        assert_eq!(pinyin("r5"), "r");
    }

    #[test]
    fn test_decode_pinyin_umlaut() {
        assert_eq!(pinyin("lu:4"), "lǜ");
        assert_eq!(pinyin("nu:3"), "nǚ");
        assert_eq!(pinyin("lu:e4"), "lüè");
        assert_eq!(pinyin("nv3"), "nǚ");
        assert_eq!(pinyin("LU:4"), "lǜ");
    }

    #[test]
    fn test_decode_pinyin_orphan_umlaut() {
        let err = decode_pinyin("x:3", ToneStyle::Marks).unwrap_err();
        assert!(matches!(err, Error::OrphanUmlaut { .. }));
        assert!(decode_pinyin(":1", ToneStyle::Marks).is_err());
    }

    #[test]
    fn test_decode_pinyin_malformed() {
        // No vowel: the digit stays
        assert_eq!(pinyin("m2"), "m2");
        assert_eq!(pinyin("hm5"), "hm");
        // Unhandled cluster gets the sentinel
        assert_eq!(pinyin("qiu1"), "qiū");
        assert_eq!(pinyin("uu1"), "uu!");
        assert_eq!(pinyin("xx"), "xx");
    }

    #[test]
    fn test_decode_pinyin_keeps_other_characters() {
        // Separators and out-of-range digits flush the buffer and stay
        assert_eq!(pinyin("·"), "·");
        assert_eq!(pinyin("shang4·hai3"), "shàng·hǎi");
        assert_eq!(pinyin("ma7"), "ma7");
        assert_eq!(pinyin("a9i1"), "a9ī");
    }

    #[test]
    fn test_decode_pinyin_several_syllables() {
        assert_eq!(pinyin("ni3hao3"), "nǐhǎo");
        assert_eq!(pinyin("yi1xie1"), "yīxiē");
    }

    #[test]
    fn test_decode_pinyin_styles() {
        assert_eq!(decode_pinyin("ni3", ToneStyle::Numbers).unwrap(), "ni3");
        assert_eq!(decode_pinyin("ni3", ToneStyle::Removed).unwrap(), "ni");
        // Removal does not validate the syllable
        assert_eq!(decode_pinyin("x:3", ToneStyle::Removed).unwrap(), "x:");
    }

    #[test]
    fn test_tone_style_precedence() {
        assert_eq!(ToneStyle::from_flags(false, false), ToneStyle::Marks);
        assert_eq!(ToneStyle::from_flags(true, false), ToneStyle::Numbers);
        assert_eq!(ToneStyle::from_flags(true, true), ToneStyle::Removed);
        assert_eq!(ToneStyle::from_flags(false, true), ToneStyle::Removed);
    }

    #[test]
    fn test_decode_jyutping() {
        assert_eq!(jyutping("nei5"), "něi");
        assert_eq!(jyutping("jat1"), "jāt");
        assert_eq!(jyutping("hou2"), "hóu");
        assert_eq!(jyutping("gwai3"), "gwâi");
        assert_eq!(jyutping("cyun4"), "cyùn");
        assert_eq!(jyutping("hai6"), "hai");
    }

    #[test]
    fn test_decode_jyutping_i_row() {
        assert_eq!(jyutping("sin1"), "sīn");
        assert_eq!(jyutping("si2"), "sí");
        assert_eq!(jyutping("si3"), "sî");
        assert_eq!(jyutping("si4"), "sì");
        assert_eq!(jyutping("si5"), "sǐ");
        assert_eq!(jyutping("sik6"), "sik");
    }

    #[test]
    fn test_decode_jyutping_e_and_o_rows() {
        assert_eq!(jyutping("se1"), "sē");
        assert_eq!(jyutping("ge3"), "gê");
        assert_eq!(jyutping("mo1"), "mō");
        assert_eq!(jyutping("soeng2"), "sóeng");
    }

    #[test]
    fn test_decode_jyutping_no_vowel() {
        assert_eq!(jyutping("m4"), "m");
        assert_eq!(jyutping("ng5"), "ng");
    }

    #[test]
    fn test_decode_jyutping_unparsable() {
        assert_eq!(jyutping("nei"), "nei");
        assert_eq!(jyutping("，"), "，");
        assert_eq!(jyutping("nei7"), "nei7");
    }

    #[test]
    fn test_decode_jyutping_styles() {
        assert_eq!(decode_jyutping("nei5", ToneStyle::Numbers), "nei5");
        assert_eq!(decode_jyutping("nei5", ToneStyle::Removed), "nei");
    }

    #[test]
    fn test_system_decode() {
        assert_eq!(
            RomanizationSystem::Pinyin.decode("ma1", ToneStyle::Marks).unwrap(),
            "mā"
        );
        assert_eq!(
            RomanizationSystem::Jyutping.decode("maa1", ToneStyle::Marks).unwrap(),
            "māa"
        );
    }

    #[test]
    fn test_tone_numbers_echo_and_removed_has_no_digits() {
        for s in ["ni3", "lu:4", "m2", "jat1", "hou2", "xx", "yi1xie1"] {
            for system in [RomanizationSystem::Pinyin, RomanizationSystem::Jyutping] {
                assert_eq!(system.decode(s, ToneStyle::Numbers).unwrap(), s);
                let removed = system.decode(s, ToneStyle::Removed).unwrap();
                assert!(!removed.chars().any(|c| c.is_ascii_digit()));
            }
        }
    }
}
