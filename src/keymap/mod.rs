//! Keyboard shortcut routing
//!
//! A small data-driven keymap:
//! - Maps keystrokes to assist commands
//! - Binds every chord under both Ctrl and Cmd
//! - Gates each binding on session conditions, so keys the assist does not
//!   act on reach the page untouched
//!
//! # Architecture
//!
//! ```text
//! KeyboardEvent → keystroke_from_dom() → Keymap::handle_keystroke() → Command → Msg
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
mod dom_adapter;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{default_bindings, load_default_keymap, DEFAULT_KEYMAP_YAML};
pub use dom_adapter::keystroke_from_dom;
pub use keymap::{KeyAction, Keymap};
pub use types::{KeyCode, Keystroke, Modifiers};
