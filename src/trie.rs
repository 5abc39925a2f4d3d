//! Trie data structure for dictionary-based segmentation.
//!
//! The Trie stores words as sequences of characters and allows longest-match
//! lookups while segmenting a run of Han text.

use std::collections::HashMap;

/// Data associated with a word in the Trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordData {
    /// Frequency from the word list
    pub freq: Option<u32>,
    /// Tag from the word list (jieba POS letter)
    pub tag: Option<String>,
}

/// A node in the Trie
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Children nodes, keyed by character
    pub children: HashMap<char, TrieNode>,
    /// Whether this node marks the end of a valid word
    pub is_leaf: bool,
    /// Data associated with this word (if is_leaf is true)
    pub data: Option<WordData>,
}

impl TrieNode {
    /// Create a new empty node
    pub fn new() -> Self {
        TrieNode::default()
    }

    /// Check if this node is a valid word ending
    pub fn is_match(&self) -> bool {
        self.is_leaf
    }
}

/// A Trie of Chinese words
#[derive(Debug, Default, Clone)]
pub struct Trie {
    root: TrieNode,
    word_count: usize,
}

impl Trie {
    /// Create a new empty Trie
    pub fn new() -> Self {
        Trie::default()
    }

    /// Get the number of words in the trie
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Check if the trie is empty
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Add a word. Data of an existing word is replaced only when `data` is Some.
    pub fn add_word(&mut self, word: &str, data: Option<WordData>) {
        if word.is_empty() {
            return;
        }

        let mut current = &mut self.root;
        for c in word.chars() {
            current = current.children.entry(c).or_insert_with(TrieNode::new);
        }

        if !current.is_leaf {
            self.word_count += 1;
        }
        current.is_leaf = true;

        if let Some(d) = data {
            current.data = Some(d);
        }
    }

    /// Walk the trie by one character, returning the next node if it exists
    pub fn walk<'a>(&'a self, c: char, current: Option<&'a TrieNode>) -> Option<&'a TrieNode> {
        let node = current.unwrap_or(&self.root);
        node.children.get(&c)
    }
}

/// Builder for loading a Trie from word lists
pub struct TrieBuilder {
    trie: Trie,
}

impl TrieBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        TrieBuilder { trie: Trie::new() }
    }

    /// Load words from a jieba-style word list (format: `word [freq [tag]]`)
    pub fn load_word_list(&mut self, content: &str) {
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let word = match parts.next() {
                Some(w) => w,
                None => continue,
            };
            let freq = parts.next().and_then(|s| s.parse::<u32>().ok());
            let tag = parts.next().map(|s| s.to_string());

            self.trie.add_word(word, Some(WordData { freq, tag }));
        }
    }

    /// Add a single word without data
    pub fn add_word(&mut self, word: &str) {
        self.trie.add_word(word, None);
    }

    /// Get the trie built so far
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Build and return the Trie
    pub fn build(self) -> Trie {
        self.trie
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}
