//! The individual widgets: trigger, menu, prompt, loader, toast

use crate::action::ActionKind;
use crate::dom::{Dom, NodeId, Rect};
use crate::surface::{EditableSurface, SurfaceId};

use super::geometry::{Placement, ANCHOR_GAP};
use super::layer::FloatingLayer;
use super::{WidgetKind, ACTION_ATTR, ROLE_ATTR};

pub const TRIGGER_LABEL: &str = "✨ AI";
pub const PROMPT_TITLE: &str = "What would you like to generate?";
const PROMPT_PLACEHOLDER: &str = "Describe the text you want...";

/// Nominal trigger size, used when the host cannot measure it
const TRIGGER_SIZE: (f64, f64) = (48.0, 24.0);

const MENU_ITEM_CLASS: &str = "penmate-menu-item";

/// What a click inside the overlay landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    Trigger,
    MenuItem(ActionKind),
    /// Inside the menu but not on an option
    MenuBackground,
    PromptSubmit,
    PromptCancel,
    /// Inside the prompt dialog, on no button
    PromptBody,
    /// Loader, toast, or bare container
    Passive,
}

impl FloatingLayer {
    /// Show the trigger button just right of the surface
    pub fn show_trigger(&mut self, dom: &mut dyn Dom, surface: &EditableSurface) -> NodeId {
        let rect = dom.bounding_rect(surface.node);
        let frame = Rect::new(
            rect.right() + ANCHOR_GAP,
            rect.top,
            TRIGGER_SIZE.0,
            TRIGGER_SIZE.1,
        );
        let node = self.spawn(
            dom,
            WidgetKind::TriggerButton,
            Some(surface.id),
            &Placement::RightOf(rect).compute(),
            Some(frame),
        );
        dom.set_attribute(node, "type", "button");
        dom.set_attribute(node, "title", "Writing assist");
        dom.set_text_content(node, TRIGGER_LABEL);
        node
    }

    /// Surface the trigger currently belongs to
    pub fn trigger_surface(&self) -> Option<SurfaceId> {
        self.widget(WidgetKind::TriggerButton)
            .and_then(|widget| widget.surface)
    }

    /// Show the action menu below the trigger. Needs a visible trigger.
    pub fn show_menu(&mut self, dom: &mut dyn Dom) -> Option<NodeId> {
        let trigger = *self.widget(WidgetKind::TriggerButton)?;
        let measured = dom.bounding_rect(trigger.node);
        let anchor = match trigger.frame {
            Some(frame) if measured.width == 0.0 && measured.height == 0.0 => frame,
            _ => measured,
        };

        let menu = self.spawn(
            dom,
            WidgetKind::ActionMenu,
            trigger.surface,
            &Placement::Below(anchor).compute(),
            None,
        );
        for action in ActionKind::ALL {
            let item = dom.create_element("div");
            dom.set_attribute(item, "class", MENU_ITEM_CLASS);
            dom.set_attribute(item, ACTION_ATTR, action.name());
            dom.set_style(item, "padding", "8px 12px");
            dom.set_style(item, "cursor", "pointer");
            dom.set_text_content(item, action.menu_label());
            dom.append_child(menu, item);
        }
        Some(menu)
    }

    /// Show the centered prompt dialog. Returns its text input.
    pub fn show_prompt(
        &mut self,
        dom: &mut dyn Dom,
        surface: Option<SurfaceId>,
        prefill: &str,
    ) -> NodeId {
        let dialog = self.spawn(
            dom,
            WidgetKind::PromptDialog,
            surface,
            &Placement::ViewportCenter.compute(),
            None,
        );

        let header = dom.create_element("h3");
        dom.set_text_content(header, PROMPT_TITLE);
        dom.set_style(header, "margin", "0 0 12px 0");
        dom.append_child(dialog, header);

        let input = dom.create_element("textarea");
        dom.set_attribute(input, ROLE_ATTR, "input");
        dom.set_attribute(input, "rows", "4");
        dom.set_attribute(input, "placeholder", PROMPT_PLACEHOLDER);
        dom.set_style(input, "width", "100%");
        dom.set_value(input, prefill);
        dom.append_child(dialog, input);

        let buttons = dom.create_element("div");
        dom.set_style(buttons, "display", "flex");
        dom.set_style(buttons, "justify-content", "flex-end");
        dom.set_style(buttons, "gap", "8px");
        dom.set_style(buttons, "margin-top", "12px");
        for (role, label) in [("cancel", "Cancel"), ("submit", "Generate")] {
            let button = dom.create_element("button");
            dom.set_attribute(button, "type", "button");
            dom.set_attribute(button, ROLE_ATTR, role);
            dom.set_text_content(button, label);
            dom.append_child(buttons, button);
        }
        dom.append_child(dialog, buttons);

        input
    }

    /// The prompt dialog's text input
    pub fn prompt_input(&self, dom: &dyn Dom) -> Option<NodeId> {
        let dialog = self.widget(WidgetKind::PromptDialog)?.node;
        dom.descendants(dialog)
            .into_iter()
            .find(|node| dom.attribute(*node, ROLE_ATTR).as_deref() == Some("input"))
    }

    /// Current prompt text, untrimmed
    pub fn prompt_text(&self, dom: &dyn Dom) -> Option<String> {
        self.prompt_input(dom).and_then(|input| dom.value(input))
    }

    /// Show the progress label below the surface
    pub fn show_loader(
        &mut self,
        dom: &mut dyn Dom,
        surface: &EditableSurface,
        action: ActionKind,
    ) -> NodeId {
        let rect = dom.bounding_rect(surface.node);
        let node = self.spawn(
            dom,
            WidgetKind::LoadingIndicator,
            Some(surface.id),
            &Placement::Below(rect).compute(),
            None,
        );
        dom.set_text_content(node, action.progress_label());
        node
    }

    /// Show a toast at the top of the viewport
    pub fn show_toast(&mut self, dom: &mut dyn Dom, message: &str) -> NodeId {
        let node = self.spawn(
            dom,
            WidgetKind::Toast,
            None,
            &Placement::ViewportTopCenter.compute(),
            None,
        );
        dom.set_attribute(node, "role", "status");
        dom.set_text_content(node, message);
        node
    }

    /// Resolve a click target against the live widgets.
    ///
    /// Returns `None` for targets outside the overlay.
    pub fn resolve_target(&self, dom: &dyn Dom, target: NodeId) -> Option<UiTarget> {
        if !self.contains(dom, target) {
            return None;
        }

        for widget in self.widgets() {
            if !dom.is_within(target, widget.node) {
                continue;
            }
            let resolved = match widget.kind {
                WidgetKind::TriggerButton => UiTarget::Trigger,
                WidgetKind::ActionMenu => closest_attribute(dom, target, widget.node, ACTION_ATTR)
                    .and_then(|name| name.parse().ok())
                    .map(UiTarget::MenuItem)
                    .unwrap_or(UiTarget::MenuBackground),
                WidgetKind::PromptDialog => {
                    match closest_attribute(dom, target, widget.node, ROLE_ATTR).as_deref() {
                        Some("submit") => UiTarget::PromptSubmit,
                        Some("cancel") => UiTarget::PromptCancel,
                        _ => UiTarget::PromptBody,
                    }
                }
                WidgetKind::LoadingIndicator | WidgetKind::Toast => UiTarget::Passive,
            };
            return Some(resolved);
        }
        Some(UiTarget::Passive)
    }
}

/// Nearest value of `name` walking up from `target`, stopping at `root`
fn closest_attribute(dom: &dyn Dom, target: NodeId, root: NodeId, name: &str) -> Option<String> {
    let mut cursor = Some(target);
    while let Some(node) = cursor {
        if let Some(value) = dom.attribute(node, name) {
            return Some(value);
        }
        if node == root {
            break;
        }
        cursor = dom.parent(node);
    }
    None
}
