//! Python bindings for pinyin-jyutping using PyO3
//!
//! This module provides Python-compatible wrappers around the romanizer.

use std::sync::Arc;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::dictionary::{collect_headwords, parse_line, DictionaryBuilder, SourceFormat};
use crate::error::{Error, SkipReason};
use crate::romanizer::{RomanizationOptions, Romanizer as RustRomanizer};
use crate::segmenter::{Segmenter, TrieSegmenter};
use crate::tone::{self, RomanizationSystem, ToneStyle};
use crate::trie::TrieBuilder;

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::Io(e) => PyIOError::new_err(e.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn read_file(path: &str) -> PyResult<String> {
    std::fs::read_to_string(path).map_err(|e| PyIOError::new_err(e.to_string()))
}

/// Romanizer - converts Chinese sentences to Pinyin or Jyutping
///
/// Sources are collected first; the dictionary is built on the first call
/// to pinyin() or jyutping() and rebuilt when more sources are added.
///
/// Example:
///     >>> from pinyin_jyutping import Romanizer
///     >>> r = Romanizer()
///     >>> r.load_cedict_file("cedict_ts.u8")
///     >>> r.pinyin("忘拿一些东西了")
///     'wàng ná yīxiē dōngxi le'
#[pyclass(name = "Romanizer")]
pub struct PyRomanizer {
    sources: Vec<(SourceFormat, String)>,
    words: Vec<String>,
    romanizer: Option<RustRomanizer>,
}

impl PyRomanizer {
    fn add_source(&mut self, format: SourceFormat, content: String) {
        self.sources.push((format, content));
        self.romanizer = None;
    }

    fn romanizer(&mut self) -> &RustRomanizer {
        let sources = &self.sources;
        let words = &self.words;
        self.romanizer.get_or_insert_with(|| {
            let mut vocabulary = TrieBuilder::new();
            for list in words {
                vocabulary.load_word_list(list);
            }
            for (format, content) in sources {
                collect_headwords(content, *format, &mut vocabulary);
            }
            let segmenter: Arc<dyn Segmenter> = Arc::new(TrieSegmenter::new(vocabulary.build()));

            let mut builder = DictionaryBuilder::new(Arc::clone(&segmenter));
            for (format, content) in sources {
                builder.load(content, *format);
            }
            RustRomanizer::new(builder.build(), segmenter)
        })
    }

    fn run(
        &mut self,
        sentence: &str,
        system: RomanizationSystem,
        tone_numbers: bool,
        spaces: bool,
        remove_tones: bool,
    ) -> PyResult<String> {
        let options = RomanizationOptions {
            tone_numbers,
            spaces,
            remove_tones,
        };
        self.romanizer()
            .romanize(sentence, system, &options)
            .map_err(to_py_err)
    }
}

/// (entries, malformed lines) of a source
fn count_entries(content: &str, format: SourceFormat) -> (usize, usize) {
    let mut counts = (0, 0);
    for line in content.lines() {
        match parse_line(line, format) {
            Ok(_) => counts.0 += 1,
            Err(SkipReason::Malformed) => counts.1 += 1,
            Err(_) => {}
        }
    }
    counts
}

#[pymethods]
impl PyRomanizer {
    #[new]
    fn new() -> Self {
        PyRomanizer {
            sources: Vec::new(),
            words: Vec::new(),
            romanizer: None,
        }
    }

    /// Add a CC-Canto source (TRAD SIMP [pinyin] {jyutping} /definition/)
    ///
    /// Returns (entries, malformed lines) for the source.
    fn load_dictionary(&mut self, content: &str) -> (usize, usize) {
        self.add_source(SourceFormat::CcCanto, content.to_string());
        count_entries(content, SourceFormat::CcCanto)
    }

    /// Add a CC-CEDICT source (TRAD SIMP [pinyin] /definition/)
    fn load_cedict(&mut self, content: &str) -> (usize, usize) {
        self.add_source(SourceFormat::CcCedict, content.to_string());
        count_entries(content, SourceFormat::CcCedict)
    }

    /// Add a CC-Canto source file
    fn load_dictionary_file(&mut self, path: &str) -> PyResult<(usize, usize)> {
        let content = read_file(path)?;
        Ok(self.load_dictionary(&content))
    }

    /// Add a CC-CEDICT source file
    fn load_cedict_file(&mut self, path: &str) -> PyResult<(usize, usize)> {
        let content = read_file(path)?;
        Ok(self.load_cedict(&content))
    }

    /// Add a segmentation word list (jieba format: word freq tag)
    fn load_words(&mut self, content: &str) {
        self.words.push(content.to_string());
        self.romanizer = None;
    }

    /// Romanize a sentence as Pinyin
    #[pyo3(signature = (sentence, tone_numbers=false, spaces=false, remove_tones=false))]
    fn pinyin(
        &mut self,
        sentence: &str,
        tone_numbers: bool,
        spaces: bool,
        remove_tones: bool,
    ) -> PyResult<String> {
        self.run(sentence, RomanizationSystem::Pinyin, tone_numbers, spaces, remove_tones)
    }

    /// Romanize a sentence as Jyutping
    #[pyo3(signature = (sentence, tone_numbers=false, spaces=false, remove_tones=false))]
    fn jyutping(
        &mut self,
        sentence: &str,
        tone_numbers: bool,
        spaces: bool,
        remove_tones: bool,
    ) -> PyResult<String> {
        self.run(sentence, RomanizationSystem::Jyutping, tone_numbers, spaces, remove_tones)
    }

    fn __repr__(&self) -> String {
        format!("Romanizer(sources={})", self.sources.len())
    }
}

/// Decode one numbered Pinyin syllable, e.g. "ni3" -> "nǐ"
#[pyfunction]
#[pyo3(signature = (syllable, tone_numbers=false, remove_tones=false))]
fn decode_pinyin(syllable: &str, tone_numbers: bool, remove_tones: bool) -> PyResult<String> {
    tone::decode_pinyin(syllable, ToneStyle::from_flags(tone_numbers, remove_tones))
        .map_err(to_py_err)
}

/// Decode one numbered Jyutping syllable, e.g. "nei5" -> "něi"
#[pyfunction]
#[pyo3(signature = (syllable, tone_numbers=false, remove_tones=false))]
fn decode_jyutping(syllable: &str, tone_numbers: bool, remove_tones: bool) -> String {
    tone::decode_jyutping(syllable, ToneStyle::from_flags(tone_numbers, remove_tones))
}

/// Create the Python module
#[pymodule]
fn pinyin_jyutping(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRomanizer>()?;
    m.add_function(wrap_pyfunction!(decode_pinyin, m)?)?;
    m.add_function(wrap_pyfunction!(decode_jyutping, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
