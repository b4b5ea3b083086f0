//! String-backed text buffer addressed by character offsets.
//!
//! Field values are small (a form field, a comment box), so a plain `String`
//! is enough; offsets are converted to byte positions on every edit.

use std::ops::Range;

/// Text of one surface, addressed by character offsets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Create a StringBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
        }
    }

    /// Access the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Total length in characters
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Convert char offset to byte offset (clamped to the end of the text)
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Get slice of text as String (by character indices)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.char_to_byte(range.start);
        let end = self.char_to_byte(range.end.max(range.start));
        self.text[start..end].to_string()
    }

    /// Insert text at character offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
    }

    /// Remove a character range
    pub fn remove(&mut self, range: Range<usize>) {
        let start = self.char_to_byte(range.start);
        let end = self.char_to_byte(range.end.max(range.start));
        self.text.replace_range(start..end, "");
    }
}
