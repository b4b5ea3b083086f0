//! Single-level undo of assist edits.
//!
//! Exactly one snapshot is retained. Saving again discards the previous one,
//! so two assist edits in a row leave only the second undoable.

use crate::classify::SurfaceKind;
use crate::dom::Dom;
use crate::editable::{get_full_text, read_selection, write_state, ChangeNotifier, Selection};
use crate::surface::{SurfaceId, SurfaceRegistry};

/// Pre-mutation state of one surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedState {
    pub surface: SurfaceId,
    pub text: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

/// Holder of the one retained [`CapturedState`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotSlot {
    captured: Option<CapturedState>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self { captured: None }
    }

    /// Whether a restore is possible right now
    pub fn is_pending(&self) -> bool {
        self.captured.is_some()
    }

    pub fn captured(&self) -> Option<&CapturedState> {
        self.captured.as_ref()
    }

    /// Drop the retained snapshot
    pub fn clear(&mut self) {
        self.captured = None;
    }

    /// Replace the retained snapshot with the surface's current state.
    ///
    /// Returns `false` (and keeps the old snapshot) if the surface cannot be
    /// located.
    pub fn save(&mut self, dom: &dyn Dom, registry: &SurfaceRegistry, surface: SurfaceId) -> bool {
        let Some(node) = registry.resolve(dom, surface) else {
            return false;
        };
        let Some(kind) = SurfaceKind::of(dom, node) else {
            return false;
        };

        let text = get_full_text(dom, node);
        let len = text.chars().count();
        let (selection_start, selection_end) = read_selection(dom, node, kind)
            .unwrap_or(Selection::caret(len))
            .bounds();

        if let Some(previous) = &self.captured {
            tracing::debug!(
                previous = %previous.surface,
                surface = %surface,
                "discarding earlier snapshot"
            );
        }
        self.captured = Some(CapturedState {
            surface,
            text,
            selection_start,
            selection_end,
        });
        true
    }

    /// Write the retained snapshot back to its surface.
    ///
    /// On success the text and selection are restored, change notifications
    /// are re-emitted, the surface is focused, and the slot is cleared. If
    /// nothing is retained or the surface is gone, nothing changes and
    /// `false` is returned.
    pub fn restore(
        &mut self,
        dom: &mut dyn Dom,
        registry: &SurfaceRegistry,
        notifier: &dyn ChangeNotifier,
    ) -> bool {
        let Some(state) = &self.captured else {
            return false;
        };
        let Some(node) = registry.resolve(dom, state.surface) else {
            tracing::debug!(surface = %state.surface, "snapshot target gone, not restoring");
            return false;
        };
        let Some(kind) = SurfaceKind::of(dom, node) else {
            return false;
        };

        write_state(
            dom,
            node,
            kind,
            &state.text,
            Selection::new(state.selection_start, state.selection_end),
        );
        notifier.notify(dom, node);
        dom.focus(node);

        tracing::info!(surface = %state.surface, "restored snapshot");
        self.captured = None;
        true
    }
}
