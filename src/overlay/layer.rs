//! Overlay container and per-kind widget slots

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId, Rect};
use crate::surface::SurfaceId;

use super::geometry::{CssPosition, MAX_Z_INDEX};
use super::{WidgetKind, CONTAINER_ID, SURFACE_REF};

const CONTAINER_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
];

/// A live widget instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Widget {
    pub kind: WidgetKind,
    pub node: NodeId,
    /// Surface the widget was spawned for (lookup key, not ownership)
    pub surface: Option<SurfaceId>,
    /// Where the widget was placed, for anchoring followers when the host
    /// reports no layout box
    pub frame: Option<Rect>,
}

/// Correction applied to a displaced container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRepair {
    /// The container had been removed (or moved under another parent)
    Reattached,
    /// The container was in `<body>` but no longer its last child
    MovedToEnd,
}

/// Owner of the overlay container and the widget singletons
#[derive(Debug, Clone, Default)]
pub struct FloatingLayer {
    container: Option<NodeId>,
    widgets: BTreeMap<WidgetKind, Widget>,
}

impl FloatingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Create the container on first use; afterwards make sure it is still
    /// the last child of `<body>`.
    pub fn ensure_container(&mut self, dom: &mut dyn Dom) -> NodeId {
        if let Some(container) = self.container {
            self.repair_container(dom);
            return container;
        }

        // Left behind by an earlier injection into the same page
        if let Some(stale) = dom.query_by_attribute("id", CONTAINER_ID) {
            dom.remove(stale);
        }

        let container = dom.create_element("div");
        dom.set_attribute(container, "id", CONTAINER_ID);
        for (property, value) in CONTAINER_STYLE {
            dom.set_style(container, property, value);
        }
        dom.set_style(container, "z-index", MAX_Z_INDEX);
        let body = dom.body();
        dom.append_child(body, container);

        tracing::debug!(node = container.0, "overlay container created");
        self.container = Some(container);
        container
    }

    /// Put a displaced container back as the last child of `<body>`.
    ///
    /// Returns `None` if nothing needed fixing or no container exists yet.
    pub fn repair_container(&mut self, dom: &mut dyn Dom) -> Option<ContainerRepair> {
        let container = self.container?;
        let body = dom.body();

        let repair = if dom.parent(container) != Some(body) {
            ContainerRepair::Reattached
        } else if dom.last_child(body) != Some(container) {
            ContainerRepair::MovedToEnd
        } else {
            return None;
        };

        dom.append_child(body, container);
        tracing::debug!(?repair, "overlay container corrected");
        Some(repair)
    }

    /// Whether `node` is the container or lies inside it
    pub fn contains(&self, dom: &dyn Dom, node: NodeId) -> bool {
        self.container
            .is_some_and(|container| dom.is_within(node, container))
    }

    pub fn widget(&self, kind: WidgetKind) -> Option<&Widget> {
        self.widgets.get(&kind)
    }

    pub fn is_showing(&self, kind: WidgetKind) -> bool {
        self.widgets.contains_key(&kind)
    }

    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// Remove the current instance of `kind`, if any
    pub fn hide(&mut self, dom: &mut dyn Dom, kind: WidgetKind) -> bool {
        let Some(widget) = self.widgets.remove(&kind) else {
            return false;
        };
        dom.remove(widget.node);
        tracing::debug!(kind = kind.class(), "widget hidden");
        true
    }

    /// Remove `node` only while it is still the current instance of `kind`.
    ///
    /// A replaced instance was already removed when its successor was shown.
    pub fn hide_if_current(&mut self, dom: &mut dyn Dom, kind: WidgetKind, node: NodeId) -> bool {
        if self.widgets.get(&kind).map(|widget| widget.node) != Some(node) {
            return false;
        }
        self.hide(dom, kind)
    }

    /// Create the root element for a new instance of `kind`, replacing any
    /// existing one.
    pub(super) fn spawn(
        &mut self,
        dom: &mut dyn Dom,
        kind: WidgetKind,
        surface: Option<SurfaceId>,
        position: &CssPosition,
        frame: Option<Rect>,
    ) -> NodeId {
        self.hide(dom, kind);
        let container = self.ensure_container(dom);

        let node = dom.create_element(kind.tag());
        dom.set_attribute(node, "class", kind.class());
        if let Some(surface) = surface {
            dom.set_attribute(node, SURFACE_REF, &surface.to_string());
        }
        for (property, value) in position.declarations() {
            dom.set_style(node, property, &value);
        }
        for (property, value) in kind.chrome() {
            dom.set_style(node, property, value);
        }
        dom.set_style(node, "pointer-events", "auto");
        dom.append_child(container, node);

        self.widgets.insert(
            kind,
            Widget {
                kind,
                node,
                surface,
                frame,
            },
        );
        tracing::debug!(kind = kind.class(), node = node.0, "widget shown");
        node
    }
}
