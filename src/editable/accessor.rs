//! Reading and writing text on live surfaces.
//!
//! Text is never cached: every call reads the node. Kinds are re-derived on
//! each call so a node that stopped being editable is caught at write time.

use crate::classify::SurfaceKind;
use crate::dom::{Dom, DomEvent, NodeId};
use crate::error::AssistError;

use super::selection::Selection;
use super::splice::{splice, InsertMode, Spliced};

/// Post-mutation hook run after every programmatic write, so the host page's
/// own handlers observe the edit as if the user typed it.
pub trait ChangeNotifier {
    fn notify(&self, dom: &mut dyn Dom, node: NodeId);
}

/// Dispatches the native `input` then `change` events
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEvents;

impl ChangeNotifier for NativeEvents {
    fn notify(&self, dom: &mut dyn Dom, node: NodeId) {
        dom.dispatch(node, DomEvent::Input);
        dom.dispatch(node, DomEvent::Change);
    }
}

/// Live selection of a surface, if one is known
pub fn read_selection(dom: &dyn Dom, node: NodeId, kind: SurfaceKind) -> Option<Selection> {
    if kind.is_form_control() {
        dom.selection_range(node).map(Selection::from_range)
    } else {
        dom.text_selection_within(node).map(Selection::from_range)
    }
}

/// Full text content: `value` for form controls, rendered text otherwise
pub fn get_full_text(dom: &dyn Dom, node: NodeId) -> String {
    match SurfaceKind::of(dom, node) {
        Some(kind) if kind.is_form_control() => dom.value(node).unwrap_or_default(),
        _ => dom.inner_text(node),
    }
}

/// Currently selected text, or an empty string for a bare caret
pub fn get_selected_text(dom: &dyn Dom, node: NodeId) -> String {
    let Some(kind) = SurfaceKind::of(dom, node) else {
        return String::new();
    };
    match read_selection(dom, node, kind) {
        Some(sel) if !sel.is_empty() => {
            let text = get_full_text(dom, node);
            text.chars()
                .skip(sel.start())
                .take(sel.len())
                .collect()
        }
        _ => String::new(),
    }
}

/// Overwrite a surface's text and selection without notifying anyone
pub fn write_state(
    dom: &mut dyn Dom,
    node: NodeId,
    kind: SurfaceKind,
    text: &str,
    selection: Selection,
) {
    let (start, end) = selection.bounds();
    if kind.is_form_control() {
        dom.set_value(node, text);
        dom.set_selection_range(node, start, end);
    } else {
        dom.set_inner_text(node, text);
        dom.set_text_selection(node, start, end);
    }
}

/// Insert `text` into the surface per `mode`, leaving the caret right after it.
///
/// Emits change notifications through `notifier`, then restores keyboard
/// focus to the surface.
pub fn insert_text(
    dom: &mut dyn Dom,
    node: NodeId,
    text: &str,
    mode: InsertMode,
    notifier: &dyn ChangeNotifier,
) -> Result<Spliced, AssistError> {
    let kind = SurfaceKind::of(dom, node).ok_or_else(|| AssistError::UnsupportedSurface {
        tag: dom.tag_name(node).unwrap_or_default(),
    })?;

    let current = get_full_text(dom, node);
    let selection = read_selection(dom, node, kind);
    let spliced = splice(&current, selection, text, mode);

    write_state(dom, node, kind, &spliced.text, Selection::caret(spliced.caret()));
    notifier.notify(dom, node);
    dom.focus(node);

    tracing::debug!(
        kind = kind.label(),
        offset = spliced.edit.offset,
        deleted = spliced.edit.deleted_text.chars().count(),
        inserted = spliced.edit.inserted_text.chars().count(),
        "inserted text"
    );
    Ok(spliced)
}
