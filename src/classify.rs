//! Editable surface classification
//!
//! The single source of truth for "may the assist attach to this node",
//! consulted by both the focus handler and the mutation watcher.

use crate::dom::{Dom, NodeId};

/// `type` values of `<input>` that hold free text
pub const TEXT_INPUT_TYPES: &[&str] = &["text", "search", "url", "tel", "email", "password"];

/// Every `type` keyword an `<input>` recognizes. Anything else behaves as `text`.
const KNOWN_INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

/// Which insertion strategy a surface uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Single-line `<input>`
    PlainInput,
    /// Multi-line `<textarea>`
    TextArea,
    /// Any element with `contenteditable="true"`
    RichContentEditable,
}

impl SurfaceKind {
    /// Classify a node, returning `None` when it is not a text-editable surface
    pub fn of(dom: &dyn Dom, node: NodeId) -> Option<SurfaceKind> {
        if dom.attribute(node, "contenteditable").as_deref() == Some("true") {
            return Some(SurfaceKind::RichContentEditable);
        }

        match dom.tag_name(node)?.as_str() {
            "textarea" => Some(SurfaceKind::TextArea),
            "input" => {
                let input_type = dom.attribute(node, "type").unwrap_or_default();
                is_text_input_type(&input_type).then_some(SurfaceKind::PlainInput)
            }
            _ => None,
        }
    }

    /// Whether the surface is a form control with a `value` property
    pub fn is_form_control(self) -> bool {
        matches!(self, SurfaceKind::PlainInput | SurfaceKind::TextArea)
    }

    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::PlainInput => "plain-input",
            SurfaceKind::TextArea => "textarea",
            SurfaceKind::RichContentEditable => "rich-contenteditable",
        }
    }
}

/// The `type` an input actually has for a raw attribute value.
///
/// Keywords match case-insensitively; missing, empty and unrecognized values
/// fall back to `text`.
pub fn effective_input_type(raw: &str) -> &'static str {
    KNOWN_INPUT_TYPES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(raw.trim()))
        .copied()
        .unwrap_or("text")
}

/// Whether an `<input type=...>` value denotes a text field
pub fn is_text_input_type(input_type: &str) -> bool {
    TEXT_INPUT_TYPES.contains(&effective_input_type(input_type))
}

/// Pure eligibility check: is this node a text-editable surface?
pub fn is_editable_surface(dom: &dyn Dom, node: NodeId) -> bool {
    SurfaceKind::of(dom, node).is_some()
}
