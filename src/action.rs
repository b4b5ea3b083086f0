//! The four assist actions offered by the menu and the shortcuts

use std::fmt;
use std::str::FromStr;

/// A user-chosen assist action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Generate,
    Rewrite,
    Summarize,
    Expand,
}

impl ActionKind {
    /// Menu order
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Generate,
        ActionKind::Rewrite,
        ActionKind::Summarize,
        ActionKind::Expand,
    ];

    /// Value of the menu option's `data-action` attribute
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Generate => "generate",
            ActionKind::Rewrite => "rewrite",
            ActionKind::Summarize => "summarize",
            ActionKind::Expand => "expand",
        }
    }

    /// Menu entry label
    pub fn menu_label(self) -> &'static str {
        match self {
            ActionKind::Generate => "Generate AI Text",
            ActionKind::Rewrite => "Rewrite",
            ActionKind::Summarize => "Summarize",
            ActionKind::Expand => "Expand",
        }
    }

    /// Loading indicator label while a request is in flight
    pub fn progress_label(self) -> &'static str {
        match self {
            ActionKind::Generate => "Generating…",
            ActionKind::Rewrite => "Rewriting…",
            ActionKind::Summarize => "Summarizing…",
            ActionKind::Expand => "Expanding…",
        }
    }

    /// Whether the action refuses to run without a selection
    pub fn requires_selection(self) -> bool {
        matches!(self, ActionKind::Rewrite | ActionKind::Expand)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}
