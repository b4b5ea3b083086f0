//! Focus and mutation watching

use crate::classify::is_editable_surface;
use crate::commands::Cmd;
use crate::dom::{Dom, NodeId};
use crate::messages::{FocusMsg, Msg, MutationMsg};
use crate::overlay::WidgetKind;
use crate::session::Session;

/// Handle focus changes
pub fn update_focus<D: Dom>(session: &mut Session<D>, msg: FocusMsg) -> Option<Cmd> {
    match msg {
        FocusMsg::FocusIn { target } => {
            adopt_surface(session, target);
            None
        }

        FocusMsg::FocusOut { target } => {
            if session.layer.contains(&session.dom, target) {
                return None;
            }
            let surface = session.recognize(target)?;
            Some(Cmd::delay(
                session.config.blur_grace(),
                Msg::Focus(FocusMsg::BlurGraceElapsed {
                    surface: surface.id,
                }),
            ))
        }

        FocusMsg::BlurGraceElapsed { surface } => {
            if session.layer.trigger_surface() != Some(surface) {
                return None;
            }
            if let Some(active) = session.dom.active_element() {
                if session.layer.contains(&session.dom, active)
                    || is_editable_surface(&session.dom, active)
                {
                    return None;
                }
            }
            tracing::debug!(surface = %surface, "hiding trigger after blur");
            session.layer.hide(&mut session.dom, WidgetKind::TriggerButton);
            None
        }
    }
}

/// Handle structural page changes
pub fn update_mutation<D: Dom>(session: &mut Session<D>, msg: MutationMsg) -> Option<Cmd> {
    match msg {
        MutationMsg::NodesAdded(roots) => {
            for root in roots {
                if !session.dom.contains(root) || session.layer.contains(&session.dom, root) {
                    continue;
                }
                let mut nodes = vec![root];
                nodes.extend(session.dom.descendants(root));
                for node in nodes {
                    adopt_surface(session, node);
                }
            }
            None
        }

        MutationMsg::NodesRemoved(_) => {
            for id in session.registry.forget_detached(&session.dom) {
                tracing::debug!(surface = %id, "surface left the page");
                for kind in [WidgetKind::TriggerButton, WidgetKind::ActionMenu] {
                    if session.layer.widget(kind).and_then(|w| w.surface) == Some(id) {
                        session.layer.hide(&mut session.dom, kind);
                    }
                }
                if session.snapshot.captured().map(|state| state.surface) == Some(id) {
                    session.snapshot.clear();
                }
                session.clear_current_if(id);
            }
            None
        }

        MutationMsg::BodyChildrenChanged => {
            if let Some(repair) = session.layer.repair_container(&mut session.dom) {
                tracing::debug!(?repair, "overlay container repaired");
            }
            None
        }
    }
}

/// Make `node` the current surface and show its trigger, if it qualifies
fn adopt_surface<D: Dom>(session: &mut Session<D>, node: NodeId) {
    let Some(surface) = session.recognize(node) else {
        return;
    };
    session.set_current(surface.id);
    session.layer.show_trigger(&mut session.dom, &surface);
}
