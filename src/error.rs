//! Error types.

use thiserror::Error;

/// Errors that abort a romanization or a load.
#[derive(Debug, Error)]
pub enum Error {
    /// A `:` umlaut marker with no `u` in front of it, e.g. `x:3`.
    ///
    /// Dictionary sources only ever write `u:`, so this means the syllable
    /// did not come from a well-formed source.
    #[error("umlaut marker ':' without a preceding 'u' in syllable [{syllable}]")]
    OrphanUmlaut { syllable: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a dictionary line, or one form of it, did not make it into the maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("comment line")]
    Comment,
    #[error("boilerplate line")]
    Boilerplate,
    #[error("blank line")]
    Blank,
    /// The line does not follow the dictionary grammar.
    #[error("malformed line")]
    Malformed,
    /// Character and syllable counts disagree after stripping punctuation.
    #[error("length mismatch: {chars} characters, {syllables} syllables")]
    LengthMismatch { chars: usize, syllables: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OrphanUmlaut {
            syllable: "x:3".to_string(),
        };
        assert!(err.to_string().contains("x:3"));

        let skip = SkipReason::LengthMismatch {
            chars: 3,
            syllables: 2,
        };
        assert_eq!(skip.to_string(), "length mismatch: 3 characters, 2 syllables");
    }
}
