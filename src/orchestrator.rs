//! Action orchestration
//!
//! Turns a chosen action into a generation request, and a generation result
//! into an insertion. The originating surface and the insert mode are
//! captured when the request is made, so focus moving elsewhere during the
//! round trip cannot redirect the result.

use crate::action::ActionKind;
use crate::commands::Cmd;
use crate::dom::{Dom, NodeId};
use crate::editable::{get_full_text, get_selected_text, insert_text, InsertMode};
use crate::error::{AssistError, GenerationError};
use crate::generation::{GenerationPayload, RequestId};
use crate::overlay::WidgetKind;
use crate::session::Session;
use crate::surface::{EditableSurface, SurfaceId};

pub const SUCCESS_MESSAGE: &str = "Text inserted (Ctrl+Z to undo)";

/// A generation call that has been sent but not answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    /// Where the result goes, captured at dispatch time
    pub surface: SurfaceId,
    pub action: ActionKind,
    pub mode: InsertMode,
    /// This request's own loading indicator
    pub loader: NodeId,
}

/// What an action turns into before anything is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionPlan {
    /// Ask the user for a free-form prompt first
    OpenPrompt,
    Request { prompt: String, mode: InsertMode },
}

/// Decide what `action` does given the surface's selected and full text
pub fn plan_action(action: ActionKind, selected: &str, full: &str) -> Result<ActionPlan, AssistError> {
    if action.requires_selection() && selected.is_empty() {
        return Err(AssistError::EmptySelection { action });
    }

    let plan = match action {
        ActionKind::Generate => ActionPlan::OpenPrompt,
        ActionKind::Rewrite => ActionPlan::Request {
            prompt: format!("Rewrite the following text: {}", selected),
            mode: InsertMode::ReplaceSelection,
        },
        ActionKind::Summarize if selected.is_empty() => ActionPlan::Request {
            prompt: format!("Summarize the following text: {}", full),
            mode: InsertMode::AtCaret,
        },
        ActionKind::Summarize => ActionPlan::Request {
            prompt: format!("Summarize the following text: {}", selected),
            mode: InsertMode::ReplaceSelection,
        },
        ActionKind::Expand => ActionPlan::Request {
            prompt: format!("Expand on the following text with more details: {}", selected),
            mode: InsertMode::ReplaceSelection,
        },
    };
    Ok(plan)
}

/// Run `action` against the current surface
pub fn perform_action<D: Dom>(session: &mut Session<D>, action: ActionKind) -> Option<Cmd> {
    session.layer.hide(&mut session.dom, WidgetKind::ActionMenu);

    let Some(surface) = session.current_surface() else {
        return session.report(&AssistError::NoTargetSurface);
    };
    let selected = get_selected_text(&session.dom, surface.node);
    let full = get_full_text(&session.dom, surface.node);
    tracing::debug!(
        action = %action,
        surface = %surface.id,
        selected = selected.chars().count(),
        "performing action"
    );

    match plan_action(action, &selected, &full) {
        Ok(ActionPlan::OpenPrompt) => open_prompt(session, Some(surface.id)),
        Ok(ActionPlan::Request { prompt, mode }) => {
            dispatch_generation(session, &surface, action, prompt, mode)
        }
        Err(err) => session.report(&err),
    }
}

/// Show the prompt dialog for `origin` and focus its input
pub fn open_prompt<D: Dom>(session: &mut Session<D>, origin: Option<SurfaceId>) -> Option<Cmd> {
    let input = session.layer.show_prompt(&mut session.dom, origin, "");
    Some(Cmd::FocusNode(input))
}

/// Submit the open prompt dialog.
///
/// A blank prompt keeps the dialog open and shows guidance.
pub fn submit_prompt<D: Dom>(session: &mut Session<D>) -> Option<Cmd> {
    let dialog = *session.layer.widget(WidgetKind::PromptDialog)?;
    let prompt = session
        .layer
        .prompt_text(&session.dom)
        .unwrap_or_default()
        .trim()
        .to_string();
    if prompt.is_empty() {
        return session.report(&AssistError::EmptyPrompt);
    }

    session.layer.hide(&mut session.dom, WidgetKind::PromptDialog);

    let target = match dialog.surface {
        Some(id) => session
            .surface(id)
            .ok_or(AssistError::StaleTarget { surface: id }),
        None => Err(AssistError::NoTargetSurface),
    };
    match target {
        Ok(surface) => {
            session.set_current(surface.id);
            dispatch_generation(
                session,
                &surface,
                ActionKind::Generate,
                prompt,
                InsertMode::AtCaret,
            )
        }
        Err(err) => session.report(&err),
    }
}

/// Snapshot the surface, show the loader, and send the request
fn dispatch_generation<D: Dom>(
    session: &mut Session<D>,
    surface: &EditableSurface,
    action: ActionKind,
    prompt: String,
    mode: InsertMode,
) -> Option<Cmd> {
    let Some(api_key) = session.settings.credential().map(str::to_owned) else {
        return session.report(&AssistError::MissingCredential);
    };

    session
        .snapshot
        .save(&session.dom, &session.registry, surface.id);
    let loader = session.layer.show_loader(&mut session.dom, surface, action);

    let id = session.next_request_id();
    session.track(PendingRequest {
        id,
        surface: surface.id,
        action,
        mode,
        loader,
    });
    tracing::info!(
        request = %id,
        action = %action,
        surface = %surface.id,
        model = %session.settings.model,
        "dispatching generation request"
    );

    Some(Cmd::Generate {
        request: id,
        payload: GenerationPayload::new(api_key, session.settings.model.clone(), prompt),
    })
}

/// Route a generation result to insertion or to an error toast
pub fn complete_generation<D: Dom>(
    session: &mut Session<D>,
    request: RequestId,
    result: Result<String, GenerationError>,
) -> Option<Cmd> {
    let Some(pending) = session.take_pending(request) else {
        tracing::debug!(request = %request, "result for unknown request ignored");
        return None;
    };
    session
        .layer
        .hide_if_current(&mut session.dom, WidgetKind::LoadingIndicator, pending.loader);

    let text = match result {
        Ok(text) => text,
        Err(err) => {
            release_snapshot(session, pending.surface);
            return session.report(&AssistError::from(err));
        }
    };

    let Some(node) = session.registry.resolve(&session.dom, pending.surface) else {
        release_snapshot(session, pending.surface);
        return session.report(&AssistError::StaleTarget {
            surface: pending.surface,
        });
    };

    match insert_text(
        &mut session.dom,
        node,
        text.trim(),
        pending.mode,
        session.notifier.as_ref(),
    ) {
        Ok(_) => {
            tracing::info!(request = %request, surface = %pending.surface, "generated text inserted");
            session.toast(SUCCESS_MESSAGE)
        }
        Err(err) => {
            release_snapshot(session, pending.surface);
            session.report(&err)
        }
    }
}

/// Drop the snapshot taken for a request that changed nothing.
///
/// Kept while another in-flight request on the same surface may still use it.
fn release_snapshot<D: Dom>(session: &mut Session<D>, surface: SurfaceId) {
    let owned = session.snapshot.captured().map(|state| state.surface) == Some(surface);
    let shared = session
        .pending_requests()
        .any(|request| request.surface == surface);
    if owned && !shared {
        tracing::debug!(surface = %surface, "releasing snapshot of failed request");
        session.snapshot.clear();
    }
}

/// Undo the last assist edit. Returns whether anything was restored.
pub fn restore_snapshot<D: Dom>(session: &mut Session<D>) -> bool {
    let surface = session.snapshot.captured().map(|state| state.surface);
    let restored = session.snapshot.restore(
        &mut session.dom,
        &session.registry,
        session.notifier.as_ref(),
    );
    if let (true, Some(surface)) = (restored, surface) {
        session.set_current(surface);
    }
    restored
}
