//! Minimal document model seen by the assist core
//!
//! The core never touches a browser directly. Everything it needs from the
//! page goes through the [`Dom`] trait, which the host environment implements
//! (browser bindings in the extension, [`MemoryDom`] in tests and replays).
//!
//! All text offsets are character offsets (Unicode scalar values), never bytes.

mod memory;

pub use memory::MemoryDom;

/// Opaque handle to a node in the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// Viewport-relative bounding box of a node, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge X coordinate
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge Y coordinate
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Native notifications the core synthesizes on a mutated surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEvent {
    /// The `input` event: value changed
    Input,
    /// The `change` event: content committed
    Change,
}

impl DomEvent {
    /// DOM event type name
    pub fn name(self) -> &'static str {
        match self {
            DomEvent::Input => "input",
            DomEvent::Change => "change",
        }
    }
}

/// Operations the assist core needs from the host document.
///
/// Methods taking a node that no longer exists are no-ops (setters) or return
/// `None`/empty values (getters); they never panic.
pub trait Dom {
    /// The document body
    fn body(&self) -> NodeId;

    /// Whether the node is currently attached to the document
    fn contains(&self, node: NodeId) -> bool;

    /// Parent of the node, if attached to one
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Direct children in document order
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Last direct child
    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    /// Lowercase tag name (`"input"`, `"textarea"`, `"div"`, ...)
    fn tag_name(&self, node: NodeId) -> Option<String>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// First attached node whose attribute `name` equals `value`
    fn query_by_attribute(&self, name: &str, value: &str) -> Option<NodeId>;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach the node (and its subtree) from the document
    fn remove(&mut self, node: NodeId);

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Replace the node's children with a single text run
    fn set_text_content(&mut self, node: NodeId, text: &str);

    fn bounding_rect(&self, node: NodeId) -> Rect;

    // ---------------------------------------------------------------------
    // Form controls (input / textarea)
    // ---------------------------------------------------------------------

    /// The `value` property of a form control
    fn value(&self, node: NodeId) -> Option<String>;

    fn set_value(&mut self, node: NodeId, value: &str);

    /// `selectionStart`/`selectionEnd` of a form control
    fn selection_range(&self, node: NodeId) -> Option<(usize, usize)>;

    fn set_selection_range(&mut self, node: NodeId, start: usize, end: usize);

    // ---------------------------------------------------------------------
    // Rendered text (contenteditable)
    // ---------------------------------------------------------------------

    /// Rendered inner text of an element
    fn inner_text(&self, node: NodeId) -> String;

    fn set_inner_text(&mut self, node: NodeId, text: &str);

    /// The document text selection, as offsets into `node`'s inner text,
    /// when the selection lies inside `node`
    fn text_selection_within(&self, node: NodeId) -> Option<(usize, usize)>;

    fn set_text_selection(&mut self, node: NodeId, start: usize, end: usize);

    // ---------------------------------------------------------------------
    // Events and focus
    // ---------------------------------------------------------------------

    /// Dispatch a bubbling native event on the node
    fn dispatch(&mut self, node: NodeId, event: DomEvent);

    fn focus(&mut self, node: NodeId);

    fn active_element(&self) -> Option<NodeId>;

    /// Whether `node` is `ancestor` or lies in its subtree
    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// All attached descendants of `node` (excluding `node`), depth first
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).into_iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 30.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 50.0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(DomEvent::Input.name(), "input");
        assert_eq!(DomEvent::Change.name(), "change");
    }
}
