//! Per-page session state
//!
//! One `Session` exists per page load. It owns every piece of mutable assist
//! state: the current surface, the overlay, the snapshot slot, and the
//! in-flight requests. Nothing is persisted; a reload starts fresh.

use std::collections::BTreeMap;

use crate::classify::SurfaceKind;
use crate::commands::Cmd;
use crate::config::AssistConfig;
use crate::dom::{Dom, NodeId};
use crate::editable::{ChangeNotifier, NativeEvents};
use crate::error::AssistError;
use crate::generation::RequestId;
use crate::keymap::{load_default_keymap, KeyContext, Keymap};
use crate::messages::{Msg, UiMsg};
use crate::orchestrator::PendingRequest;
use crate::overlay::{FloatingLayer, WidgetKind};
use crate::settings::Settings;
use crate::snapshot::SnapshotSlot;
use crate::surface::{EditableSurface, SurfaceId, SurfaceRegistry};

pub struct Session<D: Dom> {
    pub dom: D,
    pub registry: SurfaceRegistry,
    pub layer: FloatingLayer,
    pub snapshot: SnapshotSlot,
    pub keymap: Keymap,
    pub settings: Settings,
    pub config: AssistConfig,
    /// Most recently focused (or inserted) surface; survives blur
    current: Option<SurfaceId>,
    pending: BTreeMap<RequestId, PendingRequest>,
    next_request: u64,
    /// Trigger node pressed but not yet clicked
    pub(crate) armed_pointer: Option<NodeId>,
    pub(crate) notifier: Box<dyn ChangeNotifier>,
}

impl<D: Dom> Session<D> {
    pub fn new(dom: D, settings: Settings, config: AssistConfig) -> Self {
        Self {
            dom,
            registry: SurfaceRegistry::new(),
            layer: FloatingLayer::new(),
            snapshot: SnapshotSlot::new(),
            keymap: Keymap::with_bindings(load_default_keymap()),
            settings,
            config,
            current: None,
            pending: BTreeMap::new(),
            next_request: 1,
            armed_pointer: None,
            notifier: Box::new(NativeEvents),
        }
    }

    /// Replace the post-insertion notification hook
    pub fn with_notifier(mut self, notifier: impl ChangeNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Create the overlay container. Hosts call this once at page load.
    pub fn attach(&mut self) {
        self.layer.ensure_container(&mut self.dom);
        tracing::info!("assist session attached");
    }

    pub fn notifier(&self) -> &dyn ChangeNotifier {
        self.notifier.as_ref()
    }

    // ---------------------------------------------------------------------
    // Surfaces
    // ---------------------------------------------------------------------

    pub fn current_surface_id(&self) -> Option<SurfaceId> {
        self.current
    }

    pub(crate) fn set_current(&mut self, surface: SurfaceId) {
        if self.current != Some(surface) {
            tracing::debug!(surface = %surface, "current surface changed");
        }
        self.current = Some(surface);
    }

    pub(crate) fn clear_current_if(&mut self, surface: SurfaceId) {
        if self.current == Some(surface) {
            self.current = None;
        }
    }

    /// Locate a live surface by id, re-deriving its kind
    pub fn surface(&self, id: SurfaceId) -> Option<EditableSurface> {
        let node = self.registry.resolve(&self.dom, id)?;
        let kind = SurfaceKind::of(&self.dom, node)?;
        Some(EditableSurface { id, node, kind })
    }

    /// The current surface, if it can still be located
    pub fn current_surface(&self) -> Option<EditableSurface> {
        self.current.and_then(|id| self.surface(id))
    }

    /// Recognize `node` as a surface unless it is part of the overlay
    pub(crate) fn recognize(&mut self, node: NodeId) -> Option<EditableSurface> {
        if self.layer.contains(&self.dom, node) {
            return None;
        }
        self.registry.recognize(&mut self.dom, node)
    }

    // ---------------------------------------------------------------------
    // Requests
    // ---------------------------------------------------------------------

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }

    pub(crate) fn track(&mut self, request: PendingRequest) {
        self.pending.insert(request.id, request);
    }

    pub(crate) fn take_pending(&mut self, id: RequestId) -> Option<PendingRequest> {
        self.pending.remove(&id)
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &PendingRequest> {
        self.pending.values()
    }

    // ---------------------------------------------------------------------
    // Feedback
    // ---------------------------------------------------------------------

    /// Show a toast and schedule its removal
    pub fn toast(&mut self, message: &str) -> Option<Cmd> {
        let node = self.layer.show_toast(&mut self.dom, message);
        Some(Cmd::delay(
            self.config.toast_duration(),
            Msg::Ui(UiMsg::ToastExpired { node }),
        ))
    }

    /// Surface an error to the user as a toast
    pub fn report(&mut self, err: &AssistError) -> Option<Cmd> {
        if err.is_guidance() {
            tracing::debug!(error = %err, "assist guidance");
        } else {
            tracing::warn!(error = %err, "assist action failed");
        }
        self.toast(&err.to_string())
    }

    /// Conditions for keybinding evaluation
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            surface_active: self.current_surface().is_some(),
            trigger_visible: self.layer.is_showing(WidgetKind::TriggerButton),
            snapshot_pending: self.snapshot.is_pending(),
            prompt_open: self.layer.is_showing(WidgetKind::PromptDialog),
            menu_open: self.layer.is_showing(WidgetKind::ActionMenu),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn session() -> Session<MemoryDom> {
        Session::new(MemoryDom::new(), Settings::default(), AssistConfig::default())
    }

    #[test]
    fn test_overlay_nodes_are_never_surfaces() {
        let mut session = session();
        let input = session.layer.show_prompt(&mut session.dom, None, "");

        assert!(session.recognize(input).is_none());
    }

    #[test]
    fn test_current_surface_requires_live_node() {
        let mut session = session();
        let input = session.dom.add_input(None, "x");
        let surface = session.recognize(input).unwrap();
        session.set_current(surface.id);
        assert_eq!(session.current_surface(), Some(surface));

        session.dom.remove(input);
        assert_eq!(session.current_surface(), None);
        assert_eq!(session.current_surface_id(), Some(surface.id));
    }

    #[test]
    fn test_toast_schedules_expiry() {
        let mut session = session();
        let cmd = session.toast("hello").unwrap();

        let node = session.layer.widget(WidgetKind::Toast).unwrap().node;
        assert_eq!(
            cmd,
            Cmd::delay(
                std::time::Duration::from_secs(3),
                Msg::Ui(UiMsg::ToastExpired { node })
            )
        );
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let mut session = session();
        let a = session.next_request_id();
        let b = session.next_request_id();
        assert!(b > a);
    }
}
