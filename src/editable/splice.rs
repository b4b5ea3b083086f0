//! Pure text splicing: replace-selection and insert-at-caret.

use super::buffer::StringBuffer;
use super::selection::Selection;

/// Where generated text goes relative to the live selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertMode {
    /// Delete a non-empty selection and put the text in its place
    ReplaceSelection,
    /// Insert at the caret (selection end), leaving existing text intact
    AtCaret,
}

/// A single applied edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Char offset where the edit occurred
    pub offset: usize,
    /// Text that was deleted (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted
    pub inserted_text: String,
    /// Caret offset after the edit
    pub caret_after: usize,
}

/// Result of a splice: the new full text plus what changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    pub text: String,
    pub edit: EditOperation,
}

impl Spliced {
    pub fn caret(&self) -> usize {
        self.edit.caret_after
    }
}

/// Splice `insert` into `text`.
///
/// `selection` is the live selection, or `None` when no caret is known, in
/// which case the text is appended. With [`InsertMode::ReplaceSelection`] and
/// a non-empty selection the selected range is replaced; otherwise the text
/// goes in at the selection end. The caret always ends right after the
/// inserted text.
pub fn splice(
    text: &str,
    selection: Option<Selection>,
    insert: &str,
    mode: InsertMode,
) -> Spliced {
    let mut buffer = StringBuffer::from_text(text);
    let len = buffer.len_chars();
    let selection = selection.map(|sel| sel.clamped(len));

    let (offset, deleted_text) = match selection {
        Some(sel) if mode == InsertMode::ReplaceSelection && !sel.is_empty() => {
            let deleted = buffer.slice(sel.start()..sel.end());
            buffer.remove(sel.start()..sel.end());
            (sel.start(), deleted)
        }
        Some(sel) => (sel.end(), String::new()),
        None => (len, String::new()),
    };

    buffer.insert(offset, insert);
    let caret_after = offset + insert.chars().count();

    Spliced {
        text: buffer.into_string(),
        edit: EditOperation {
            offset,
            deleted_text,
            inserted_text: insert.to_string(),
            caret_after,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_selection() {
        let out = splice(
            "abcXYZdef",
            Some(Selection::new(3, 6)),
            "123",
            InsertMode::ReplaceSelection,
        );
        assert_eq!(out.text, "abc123def");
        assert_eq!(out.caret(), 6);
        assert_eq!(out.edit.deleted_text, "XYZ");
    }

    #[test]
    fn test_replace_reversed_selection() {
        let out = splice(
            "abcXYZdef",
            Some(Selection::new(6, 3)),
            "-",
            InsertMode::ReplaceSelection,
        );
        assert_eq!(out.text, "abc-def");
        assert_eq!(out.caret(), 4);
    }

    #[test]
    fn test_insert_at_caret_positions() {
        for (caret, expected) in [(0, "Xhello"), (2, "heXllo"), (5, "helloX")] {
            let out = splice(
                "hello",
                Some(Selection::caret(caret)),
                "X",
                InsertMode::AtCaret,
            );
            assert_eq!(out.text, expected);
            assert_eq!(out.caret(), caret + 1);
        }
    }

    #[test]
    fn test_replace_with_empty_selection_inserts() {
        let out = splice(
            "foo bar",
            Some(Selection::caret(3)),
            "!",
            InsertMode::ReplaceSelection,
        );
        assert_eq!(out.text, "foo! bar");
        assert!(out.edit.deleted_text.is_empty());
    }

    #[test]
    fn test_at_caret_keeps_selected_text() {
        let out = splice("foo bar", Some(Selection::new(0, 3)), "+", InsertMode::AtCaret);
        assert_eq!(out.text, "foo+ bar");
        assert_eq!(out.caret(), 4);
    }

    #[test]
    fn test_unknown_caret_appends() {
        let out = splice("foo bar", None, " baz", InsertMode::AtCaret);
        assert_eq!(out.text, "foo bar baz");
        assert_eq!(out.caret(), 11);
    }

    #[test]
    fn test_out_of_range_selection_is_clamped() {
        let out = splice("ab", Some(Selection::new(1, 99)), "Z", InsertMode::ReplaceSelection);
        assert_eq!(out.text, "aZ");
        assert_eq!(out.caret(), 2);
    }

    #[test]
    fn test_multibyte_offsets() {
        let out = splice("añb", Some(Selection::new(1, 2)), "ü", InsertMode::ReplaceSelection);
        assert_eq!(out.text, "aüb");
        assert_eq!(out.caret(), 2);
    }
}
