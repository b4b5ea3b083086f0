//! Selection bounds over a surface's text, in character offsets.

/// A text selection with anchor (start point) and head (caret position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: usize,
    /// Where the caret is (moving point)
    pub head: usize,
}

impl Selection {
    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Create a collapsed selection (caret with no range)
    pub const fn caret(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    /// Build from `selectionStart`/`selectionEnd` style bounds
    pub fn from_range((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// The start offset (minimum of anchor and head)
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// The end offset (maximum of anchor and head)
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    /// Number of selected characters
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Clamp both ends into `0..=len`
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.anchor.min(len), self.head.min(len))
    }

    /// Collapse selection to its end
    pub fn collapse_to_end(&mut self) {
        let end = self.end();
        self.anchor = end;
        self.head = end;
    }

    /// Normalised `(start, end)` pair
    pub fn bounds(&self) -> (usize, usize) {
        (self.start(), self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_caret() {
        let sel = Selection::caret(5);
        assert!(sel.is_empty());
        assert_eq!(sel.len(), 0);
        assert_eq!(sel.bounds(), (5, 5));
    }

    #[test]
    fn test_selection_start_end() {
        let forward = Selection::new(0, 5);
        assert_eq!(forward.start(), 0);
        assert_eq!(forward.end(), 5);
        assert!(!forward.is_reversed());

        let backward = Selection::new(5, 0);
        assert_eq!(backward.start(), 0);
        assert_eq!(backward.end(), 5);
        assert!(backward.is_reversed());
    }

    #[test]
    fn test_selection_clamped() {
        let sel = Selection::new(2, 40).clamped(10);
        assert_eq!(sel.bounds(), (2, 10));
    }

    #[test]
    fn test_selection_collapse_to_end() {
        let mut sel = Selection::new(7, 3);
        sel.collapse_to_end();
        assert_eq!(sel, Selection::caret(7));
    }
}
