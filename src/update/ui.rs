//! Floating UI interaction

use crate::commands::Cmd;
use crate::dom::{Dom, NodeId};
use crate::error::AssistError;
use crate::messages::{Msg, UiMsg};
use crate::orchestrator;
use crate::overlay::{UiTarget, WidgetKind};
use crate::session::Session;

/// Handle UI messages
pub fn update_ui<D: Dom>(session: &mut Session<D>, msg: UiMsg) -> Option<Cmd> {
    match msg {
        UiMsg::Click { target } => handle_click(session, target),

        UiMsg::PointerDown { target } => {
            if session.layer.resolve_target(&session.dom, target) != Some(UiTarget::Trigger) {
                return None;
            }
            session.armed_pointer = Some(target);
            Some(Cmd::delay(
                session.config.pointer_fallback(),
                Msg::Ui(UiMsg::PointerFallback { target }),
            ))
        }

        UiMsg::PointerFallback { target } => {
            if session.armed_pointer != Some(target) {
                return None;
            }
            session.armed_pointer = None;
            tracing::debug!("trigger pressed but no click arrived, opening menu");
            show_menu(session)
        }

        UiMsg::ToastExpired { node } => {
            session
                .layer
                .hide_if_current(&mut session.dom, WidgetKind::Toast, node);
            None
        }

        UiMsg::ShowMenu => show_menu(session),

        UiMsg::PerformAction(action) => orchestrator::perform_action(session, action),

        UiMsg::SubmitPrompt => orchestrator::submit_prompt(session),

        UiMsg::CancelPrompt => {
            session.layer.hide(&mut session.dom, WidgetKind::PromptDialog);
            None
        }

        UiMsg::Dismiss => {
            if !session.layer.hide(&mut session.dom, WidgetKind::PromptDialog) {
                session.layer.hide(&mut session.dom, WidgetKind::ActionMenu);
            }
            None
        }

        UiMsg::RestoreSnapshot => {
            orchestrator::restore_snapshot(session);
            None
        }
    }
}

/// Route a capture-phase click anywhere on the page
fn handle_click<D: Dom>(session: &mut Session<D>, target: NodeId) -> Option<Cmd> {
    session.armed_pointer = None;

    match session.layer.resolve_target(&session.dom, target) {
        Some(UiTarget::Trigger) => show_menu(session),
        Some(UiTarget::MenuItem(action)) => {
            let menu_surface = session
                .layer
                .widget(WidgetKind::ActionMenu)
                .and_then(|menu| menu.surface);
            if let Some(id) = menu_surface.filter(|id| session.surface(*id).is_some()) {
                session.set_current(id);
            }
            orchestrator::perform_action(session, action)
        }
        Some(UiTarget::MenuBackground) => None,
        Some(UiTarget::PromptSubmit) => orchestrator::submit_prompt(session),
        Some(UiTarget::PromptCancel) => {
            session.layer.hide(&mut session.dom, WidgetKind::PromptDialog);
            None
        }
        // Anywhere else closes the menu
        Some(UiTarget::PromptBody | UiTarget::Passive) | None => {
            session.layer.hide(&mut session.dom, WidgetKind::ActionMenu);
            None
        }
    }
}

/// Open the action menu for the trigger's surface
fn show_menu<D: Dom>(session: &mut Session<D>) -> Option<Cmd> {
    let Some(id) = session
        .layer
        .trigger_surface()
        .filter(|id| session.surface(*id).is_some())
    else {
        return session.report(&AssistError::NoTargetSurface);
    };
    session.set_current(id);
    session.layer.show_menu(&mut session.dom);
    None
}
