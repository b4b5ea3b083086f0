//! Context system for conditional keybindings
//!
//! Every assist chord is conditional: it only acts (and only swallows the
//! key) while the session is in a state where it means something.

use serde::Deserialize;

/// Session state relevant to keybinding evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// A current surface exists and can still be located
    pub surface_active: bool,
    /// The trigger button is showing
    pub trigger_visible: bool,
    /// A snapshot is waiting to be restored
    pub snapshot_pending: bool,
    /// The prompt dialog is open
    pub prompt_open: bool,
    /// The action menu is open
    pub menu_open: bool,
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    SurfaceActive,
    TriggerVisible,
    SnapshotPending,
    PromptOpen,
    MenuOpen,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::SurfaceActive => ctx.surface_active,
            Condition::TriggerVisible => ctx.trigger_visible,
            Condition::SnapshotPending => ctx.snapshot_pending,
            Condition::PromptOpen => ctx.prompt_open,
            Condition::MenuOpen => ctx.menu_open,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
