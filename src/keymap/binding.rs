//! Keybinding struct representing a mapping from keystroke to command

use super::command::Command;
use super::context::Condition;
use super::types::Keystroke;

/// A single keybinding mapping a keystroke to a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Conditions that must be true for this binding to activate
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    /// Add conditions to this binding (builder pattern)
    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    /// Add a single condition to this binding
    pub fn when_single(mut self, condition: Condition) -> Self {
        self.when = Some(vec![condition]);
        self
    }

    pub fn matches(&self, keystroke: &Keystroke) -> bool {
        self.keystroke == *keystroke
    }
}
