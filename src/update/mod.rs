//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod focus;
mod generation;
mod ui;

use crate::commands::Cmd;
use crate::dom::Dom;
use crate::keymap::{Command, KeyAction, Keystroke};
use crate::messages::Msg;
#[cfg(debug_assertions)]
use crate::messages::GenerationMsg;
use crate::orchestrator;
use crate::session::Session;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use focus::{update_focus, update_mutation};
pub use generation::update_generation;
pub use ui::update_ui;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update<D: Dom>(session: &mut Session<D>, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

fn update_inner<D: Dom>(session: &mut Session<D>, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Focus(m) => focus::update_focus(session, m),
        Msg::Mutation(m) => focus::update_mutation(session, m),
        Msg::Ui(m) => ui::update_ui(session, m),
        Msg::Generation(m) => generation::update_generation(session, m),
        Msg::Settings(settings) => {
            tracing::debug!(
                model = %settings.model,
                has_key = settings.api_key.is_some(),
                "settings changed"
            );
            session.settings = settings;
            None
        }
    }
}

/// Update with span and state-diff logging (debug builds only)
#[cfg(debug_assertions)]
fn update_traced<D: Dom>(session: &mut Session<D>, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SessionSnapshot::from_session(session);
    let result = update_inner(session, msg);
    let after = SessionSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Focus(m) => format!("Focus::{:?}", m),
        Msg::Mutation(m) => format!("Mutation::{:?}", m),
        Msg::Ui(m) => format!("Ui::{:?}", m),
        Msg::Generation(GenerationMsg::Completed { request, result }) => format!(
            "Generation::Completed({}, {})",
            request,
            if result.is_ok() { "ok" } else { "err" }
        ),
        Msg::Settings(_) => "Settings".to_string(),
    }
}

/// What the host should do with a key event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyOutcome {
    /// Suppress the page's own handling of the key
    pub prevent_default: bool,
    pub cmd: Option<Cmd>,
}

/// Route a key press through the keymap.
///
/// Keys are only claimed when a binding actually acts. Undo is claimed only
/// when a snapshot was restored, so the page's native undo fires otherwise.
pub fn handle_keystroke<D: Dom>(session: &mut Session<D>, keystroke: Keystroke) -> KeyOutcome {
    let context = session.key_context();
    match session.keymap.handle_keystroke(keystroke, &context) {
        KeyAction::NoMatch => KeyOutcome::default(),
        KeyAction::Execute(Command::RestoreSnapshot) => KeyOutcome {
            prevent_default: orchestrator::restore_snapshot(session),
            cmd: None,
        },
        KeyAction::Execute(command) => {
            tracing::debug!(keystroke = %keystroke, command = command.name(), "shortcut");
            KeyOutcome {
                prevent_default: true,
                cmd: update(session, command.to_msg()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistConfig;
    use crate::dom::MemoryDom;
    use crate::keymap::{KeyCode, Modifiers};
    use crate::settings::Settings;

    fn session() -> Session<MemoryDom> {
        Session::new(MemoryDom::new(), Settings::default(), AssistConfig::default())
    }

    #[test]
    fn test_unbound_key_is_left_alone() {
        let mut session = session();
        let outcome = handle_keystroke(&mut session, Keystroke::new(KeyCode::Char('x'), Modifiers::NONE));
        assert_eq!(outcome, KeyOutcome::default());
    }

    #[test]
    fn test_undo_without_snapshot_passes_through() {
        let mut session = session();
        let outcome = handle_keystroke(&mut session, Keystroke::new(KeyCode::Char('z'), Modifiers::CTRL));
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn test_settings_message_replaces_settings() {
        let mut session = session();
        let settings = Settings {
            api_key: Some("k".to_string()),
            model: "gpt-4o".to_string(),
            ..Settings::default()
        };
        update(&mut session, Msg::Settings(settings.clone()));
        assert_eq!(session.settings, settings);
    }
}
