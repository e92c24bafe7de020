//! Per-character encoding tables
//!
//! An encoding table maps single characters to replacement strings. Formatters apply it to
//! token text and to gap text before anything else sees that text. Characters without an
//! entry pass through unchanged, and replacements are never encoded again.

use std::collections::HashMap;

/// A character substitution map, empty (identity) by default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodingTable {
    replacements: HashMap<char, String>,
}

impl EncodingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(character, replacement)` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, &'a str)>,
    {
        let replacements = pairs
            .into_iter()
            .map(|(ch, replacement)| (ch, replacement.to_string()))
            .collect();
        Self { replacements }
    }

    /// Add or replace the mapping for `ch`
    pub fn insert(&mut self, ch: char, replacement: impl Into<String>) {
        self.replacements.insert(ch, replacement.into());
    }

    pub fn get(&self, ch: char) -> Option<&str> {
        self.replacements.get(&ch).map(String::as_str)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.replacements.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// All mapped characters (unordered)
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.replacements.keys().copied()
    }

    /// Replace every mapped character of `text`, left to right
    pub fn encode(&self, text: &str) -> String {
        if self.replacements.is_empty() {
            return text.to_string();
        }
        let mut encoded = String::with_capacity(text.len());
        for ch in text.chars() {
            match self.replacements.get(&ch) {
                Some(replacement) => encoded.push_str(replacement),
                None => encoded.push(ch),
            }
        }
        encoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_identity() {
        let table = EncodingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.encode("a < b"), "a < b");
        assert_eq!(table.encode(""), "");
    }

    #[test]
    fn test_mapped_characters_are_replaced() {
        let table = EncodingTable::from_pairs([('<', "&lt;"), ('>', "&gt;")]);
        assert_eq!(table.encode("a < b > c"), "a &lt; b &gt; c");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_replacements_are_not_reencoded() {
        // '&' is a key and appears in the replacement for '<'
        let table = EncodingTable::from_pairs([('<', "&lt;"), ('&', "&amp;")]);
        assert_eq!(table.encode("<&"), "&lt;&amp;");
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = EncodingTable::from_pairs([(' ', "~")]);
        table.insert(' ', "\\ ");
        assert_eq!(table.get(' '), Some("\\ "));
        assert!(table.contains(' '));
        assert!(!table.contains('x'));
    }
}
