//! Romanization of a single segmented word.

use log::debug;
use unicode_normalization::UnicodeNormalization;

use crate::char_categories::canonical_char;
use crate::dictionary::RomanizationMaps;
use crate::error::Result;
use crate::romanizer::RomanizationOptions;
use crate::tone::RomanizationSystem;

/// Romanize one word token.
///
/// A multi-character token with its own word map entry is decoded from that
/// entry. Anything else goes character by character: each character takes
/// its most frequent recorded pronunciation, and characters without one
/// (punctuation, Latin text, unknown Han) are copied through unchanged.
/// Lookups fall back to the NFC spelling of the token or character, so a
/// compatibility ideograph finds the reading of its unified form.
pub fn resolve(
    token: &str,
    maps: &RomanizationMaps,
    system: RomanizationSystem,
    options: &RomanizationOptions,
) -> Result<String> {
    let style = options.tone_style();
    let separator = if options.spaces { " " } else { "" };

    if token.chars().nth(1).is_some() {
        let entry = maps.word(token).or_else(|| {
            let composed: String = token.nfc().collect();
            maps.word(&composed)
        });
        if let Some(syllables) = entry {
            debug!("[{}] as word: {:?}", token, syllables);
            let decoded = syllables
                .iter()
                .map(|s| system.decode(s, style))
                .collect::<Result<Vec<_>>>()?;
            return Ok(decoded.join(separator));
        }
    }

    let mut parts = Vec::with_capacity(token.len() / 3 + 1);
    for c in token.chars() {
        let pronunciation = maps
            .top_pronunciation(c)
            .or_else(|| canonical_char(c).and_then(|n| maps.top_pronunciation(n)));
        match pronunciation {
            Some(syllable) => parts.push(system.decode(syllable, style)?),
            None => parts.push(c.to_string()),
        }
    }
    debug!("[{}] by character: {:?}", token, parts);
    Ok(parts.join(separator))
}
