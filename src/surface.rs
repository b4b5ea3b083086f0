//! Editable surfaces and their stable identifiers
//!
//! A surface keeps no copy of its text; the registry only remembers which ids
//! are alive. Ids are written to the node as a marker attribute so a surface
//! can be re-located by lookup instead of holding on to the node.

use std::collections::BTreeMap;
use std::fmt;

use crate::classify::SurfaceKind;
use crate::dom::{Dom, NodeId};

/// Marker attribute carrying a surface's stable id
pub const SURFACE_MARKER: &str = "data-penmate-id";

/// Stable identifier of an editable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

impl SurfaceId {
    /// Parse the marker attribute value
    pub fn parse(value: &str) -> Option<Self> {
        value.trim().parse().ok().map(SurfaceId)
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node currently recognized as text-editable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditableSurface {
    pub id: SurfaceId,
    pub node: NodeId,
    pub kind: SurfaceKind,
}

/// Tracks the live surface ids of one page
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    next_id: u64,
    /// Live ids with the node they were last seen on
    known: BTreeMap<SurfaceId, NodeId>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            known: BTreeMap::new(),
        }
    }

    /// Recognize `node` as a surface, assigning (or re-reading) its stable id.
    ///
    /// Returns `None` if the node does not classify as editable.
    pub fn recognize(&mut self, dom: &mut dyn Dom, node: NodeId) -> Option<EditableSurface> {
        let kind = SurfaceKind::of(dom, node)?;

        let id = match dom.attribute(node, SURFACE_MARKER).and_then(|v| SurfaceId::parse(&v)) {
            Some(existing) => {
                self.next_id = self.next_id.max(existing.0 + 1);
                existing
            }
            None => {
                let id = SurfaceId(self.next_id.max(1));
                self.next_id = id.0 + 1;
                dom.set_attribute(node, SURFACE_MARKER, &id.to_string());
                id
            }
        };

        if self.known.insert(id, node).is_none() {
            tracing::debug!(surface = %id, kind = kind.label(), "surface recognized");
        }
        Some(EditableSurface { id, node, kind })
    }

    /// Locate a live surface by id. Fails once the node has left the document.
    pub fn resolve(&self, dom: &dyn Dom, id: SurfaceId) -> Option<NodeId> {
        let last_seen = *self.known.get(&id)?;
        let marker = id.to_string();
        if dom.contains(last_seen)
            && dom.attribute(last_seen, SURFACE_MARKER).as_deref() == Some(marker.as_str())
        {
            return Some(last_seen);
        }
        dom.query_by_attribute(SURFACE_MARKER, &marker)
    }

    /// Whether `id` is still tracked
    pub fn is_known(&self, id: SurfaceId) -> bool {
        self.known.contains_key(&id)
    }

    /// Forget every surface that can no longer be located in the document
    pub fn forget_detached(&mut self, dom: &dyn Dom) -> Vec<SurfaceId> {
        let gone: Vec<SurfaceId> = self
            .known
            .keys()
            .copied()
            .filter(|id| self.resolve(dom, *id).is_none())
            .collect();
        for id in &gone {
            self.known.remove(id);
            tracing::debug!(surface = %id, "surface forgotten");
        }
        gone
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
