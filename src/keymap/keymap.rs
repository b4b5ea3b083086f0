//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// Result of handling a keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Execute this command
    Execute(Command),
    /// No binding applies; the key belongs to the page
    NoMatch,
}

/// The keymap stores all keybindings and handles lookup
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Multiple bindings can share the same keystroke with different conditions
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keymap with the given bindings
    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// Resolve a keystroke against the context.
    ///
    /// Bindings with conditions are checked before unconditional ones; the
    /// first match wins.
    pub fn handle_keystroke(&self, keystroke: Keystroke, context: &KeyContext) -> KeyAction {
        match self.lookup_with_context(&keystroke, Some(context)) {
            Some(command) => KeyAction::Execute(command),
            None => KeyAction::NoMatch,
        }
    }

    /// Look up a keystroke.
    ///
    /// Without a context only unconditional bindings can match.
    pub fn lookup_with_context(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let indices = self.lookup.get(keystroke)?;

        for &idx in indices {
            let binding = &self.bindings[idx];
            if let (Some(conditions), Some(ctx)) = (&binding.when, context) {
                if Condition::evaluate_all(conditions, ctx) {
                    return Some(binding.command);
                }
            }
        }

        indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|binding| binding.when.is_none())
            .map(|binding| binding.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// All keystrokes bound to a command
    pub fn keystrokes_for(&self, command: Command) -> Vec<Keystroke> {
        self.bindings
            .iter()
            .filter(|b| b.command == command)
            .map(|b| b.keystroke)
            .collect()
    }
}
