//! Floating UI layer
//!
//! One page-level container, appended as the last child of `<body>`, holds
//! every widget the assist draws. The container ignores pointer events so the
//! page stays usable underneath; widgets opt back in.
//!
//! At most one widget of each [`WidgetKind`] exists. Showing a widget first
//! removes the previous instance of that kind.

mod geometry;
mod layer;
mod widgets;

pub use geometry::{px, CssPosition, Placement, ANCHOR_GAP, MAX_Z_INDEX, TOAST_TOP_MARGIN};
pub use layer::{ContainerRepair, FloatingLayer, Widget};
pub use widgets::{UiTarget, PROMPT_TITLE, TRIGGER_LABEL};

/// `id` of the overlay container element
pub const CONTAINER_ID: &str = "penmate-container";

/// Attribute on a widget naming the surface it was spawned for
pub const SURFACE_REF: &str = "data-penmate-surface";

/// Attribute on menu options naming their action
pub const ACTION_ATTR: &str = "data-action";

/// Attribute on the prompt dialog's parts
pub const ROLE_ATTR: &str = "data-penmate-role";

/// The kinds of floating widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WidgetKind {
    TriggerButton,
    ActionMenu,
    PromptDialog,
    LoadingIndicator,
    Toast,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::TriggerButton,
        WidgetKind::ActionMenu,
        WidgetKind::PromptDialog,
        WidgetKind::LoadingIndicator,
        WidgetKind::Toast,
    ];

    /// CSS class carried by the widget's root element
    pub fn class(self) -> &'static str {
        match self {
            WidgetKind::TriggerButton => "penmate-trigger",
            WidgetKind::ActionMenu => "penmate-menu",
            WidgetKind::PromptDialog => "penmate-prompt",
            WidgetKind::LoadingIndicator => "penmate-loader",
            WidgetKind::Toast => "penmate-toast",
        }
    }

    /// Tag of the widget's root element
    pub fn tag(self) -> &'static str {
        match self {
            WidgetKind::TriggerButton => "button",
            _ => "div",
        }
    }

    /// Inline styles beyond positioning
    pub(crate) fn chrome(self) -> &'static [(&'static str, &'static str)] {
        match self {
            WidgetKind::TriggerButton => &[
                ("padding", "4px 8px"),
                ("border", "none"),
                ("border-radius", "4px"),
                ("background", "#4f46e5"),
                ("color", "#ffffff"),
                ("font-size", "12px"),
                ("cursor", "pointer"),
            ],
            WidgetKind::ActionMenu => &[
                ("background", "#ffffff"),
                ("border", "1px solid #d1d5db"),
                ("border-radius", "6px"),
                ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.15)"),
                ("min-width", "160px"),
            ],
            WidgetKind::PromptDialog => &[
                ("background", "#ffffff"),
                ("padding", "16px"),
                ("border-radius", "8px"),
                ("box-shadow", "0 8px 24px rgba(0, 0, 0, 0.25)"),
                ("width", "400px"),
            ],
            WidgetKind::LoadingIndicator => &[
                ("background", "#111827"),
                ("color", "#ffffff"),
                ("padding", "4px 8px"),
                ("border-radius", "4px"),
                ("font-size", "12px"),
            ],
            WidgetKind::Toast => &[
                ("background", "#111827"),
                ("color", "#ffffff"),
                ("padding", "10px 16px"),
                ("border-radius", "6px"),
                ("font-size", "14px"),
            ],
        }
    }
}
