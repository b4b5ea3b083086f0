//! Default keybindings
//!
//! The shipped table is embedded from keymap.yaml at the project root, with a
//! hardcoded copy as fallback.

use super::binding::Keybinding;
use super::command::Command;
use super::config::parse_keymap_yaml;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
pub const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Load the shipped keymap
pub fn load_default_keymap() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(bindings) => {
            tracing::debug!("Loaded embedded keymap ({} bindings)", bindings.len());
            bindings
        }
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}, using hardcoded defaults", e);
            default_bindings()
        }
    }
}

/// Hardcoded default keybindings
///
/// Every action chord is bound under both Ctrl and Cmd so the same table
/// works on every platform.
pub fn default_bindings() -> Vec<Keybinding> {
    let mut bindings = Vec::new();

    for primary in [Modifiers::CTRL, Modifiers::META] {
        let chord = primary | Modifiers::SHIFT;
        for (key, command) in [
            ('g', Command::Generate),
            ('r', Command::Rewrite),
            ('z', Command::Summarize),
            ('e', Command::Expand),
        ] {
            bindings.push(
                Keybinding::new(Keystroke::char_with_mods(key, chord), command)
                    .when_single(Condition::SurfaceActive),
            );
        }
    }

    bindings.push(
        Keybinding::new(
            Keystroke::char_with_mods('a', Modifiers::ALT),
            Command::OpenMenu,
        )
        .when_single(Condition::TriggerVisible),
    );

    for primary in [Modifiers::CTRL, Modifiers::META] {
        bindings.push(
            Keybinding::new(
                Keystroke::char_with_mods('z', primary),
                Command::RestoreSnapshot,
            )
            .when_single(Condition::SnapshotPending),
        );
    }

    for primary in [Modifiers::CTRL, Modifiers::META] {
        bindings.push(
            Keybinding::new(Keystroke::new(KeyCode::Enter, primary), Command::SubmitPrompt)
                .when_single(Condition::PromptOpen),
        );
    }

    let escape = Keystroke::key(KeyCode::Escape);
    bindings.push(Keybinding::new(escape, Command::Dismiss).when_single(Condition::PromptOpen));
    bindings.push(Keybinding::new(escape, Command::Dismiss).when_single(Condition::MenuOpen));

    bindings
}
