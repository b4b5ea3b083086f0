//! In-memory document used by the test suite and the replay runner

use std::collections::{BTreeMap, HashMap};

use super::{Dom, DomEvent, NodeId, Rect};

#[derive(Debug, Clone, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Own text run (rendered before children)
    text: String,
    /// Form control state; `None` for non-controls
    value: Option<String>,
    selection: (usize, usize),
    rect: Rect,
}

impl NodeData {
    fn element(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let value = matches!(tag.as_str(), "input" | "textarea").then(String::new);
        Self {
            tag,
            value,
            ..Self::default()
        }
    }
}

/// A small, fully in-memory implementation of [`Dom`].
///
/// Only the body subtree counts as "the document"; detached nodes keep their
/// state so tests can observe what happened to them after removal.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
    body: NodeId,
    active: Option<NodeId>,
    text_selection: Option<(NodeId, usize, usize)>,
    events: Vec<(NodeId, DomEvent)>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create an empty document containing only a body
    pub fn new() -> Self {
        let body = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(body, NodeData::element("body"));
        Self {
            nodes,
            next_id: 2,
            body,
            active: None,
            text_selection: None,
            events: Vec::new(),
        }
    }

    /// Create an element and append it to `parent`
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        node
    }

    /// Append an `<input>` to the body; `input_type: None` leaves `type` absent
    pub fn add_input(&mut self, input_type: Option<&str>, value: &str) -> NodeId {
        let body = self.body;
        let node = self.append_new(body, "input");
        if let Some(kind) = input_type {
            self.set_attribute(node, "type", kind);
        }
        self.set_value(node, value);
        node
    }

    /// Append a `<textarea>` to the body
    pub fn add_textarea(&mut self, value: &str) -> NodeId {
        let body = self.body;
        let node = self.append_new(body, "textarea");
        self.set_value(node, value);
        node
    }

    /// Append a `<div contenteditable="true">` to the body
    pub fn add_contenteditable(&mut self, text: &str) -> NodeId {
        let body = self.body;
        let node = self.append_new(body, "div");
        self.set_attribute(node, "contenteditable", "true");
        self.set_inner_text(node, text);
        node
    }

    /// Set the bounding box reported for a node
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.rect = rect;
        }
    }

    /// Events dispatched on `node`, in order
    pub fn events_for(&self, node: NodeId) -> Vec<DomEvent> {
        self.events
            .iter()
            .filter(|(target, _)| *target == node)
            .map(|(_, event)| *event)
            .collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Attached nodes whose `class` attribute contains `class`
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let mut found: Vec<NodeId> = self
            .descendants(self.body)
            .into_iter()
            .filter(|node| {
                self.attribute(*node, "class")
                    .map(|value| value.split_whitespace().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect();
        found.sort();
        found
    }

    /// Move keyboard focus away from everything (like clicking empty page space)
    pub fn blur_all(&mut self) {
        self.active = None;
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).and_then(|data| data.parent) else {
            return;
        };
        if let Some(parent_data) = self.nodes.get_mut(&parent) {
            parent_data.children.retain(|child| *child != node);
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = None;
        }
    }
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        self.body
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node) && self.is_within(node, self.body)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|data| data.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|data| data.children.clone())
            .unwrap_or_default()
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).map(|data| data.tag.clone())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|data| data.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn query_by_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.attribute(*node, name).as_deref() == Some(value))
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(node, NodeData::element(tag));
        node
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.nodes.contains_key(&parent) || self.is_within(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(data) = self.nodes.get_mut(&child) {
            data.parent = Some(parent);
        } else {
            return;
        }
        if let Some(parent_data) = self.nodes.get_mut(&parent) {
            parent_data.children.push(child);
        }
    }

    fn remove(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        self.detach(node);
        if self.active.is_some_and(|active| self.is_within(active, node)) {
            self.active = None;
        }
        if self
            .text_selection
            .is_some_and(|(anchor, _, _)| self.is_within(anchor, node))
        {
            self.text_selection = None;
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            data.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|data| data.styles.get(property).cloned())
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = self.children(node);
        for child in children {
            self.detach(child);
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.text = text.to_string();
        }
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes.get(&node).map(|data| data.rect).unwrap_or_default()
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.nodes.get(&node).and_then(|data| data.value.clone())
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(data) = self.nodes.get_mut(&node) {
            if data.value.is_some() {
                let len = value.chars().count();
                data.value = Some(value.to_string());
                data.selection = (len, len);
            }
        }
    }

    fn selection_range(&self, node: NodeId) -> Option<(usize, usize)> {
        let data = self.nodes.get(&node)?;
        data.value.as_ref().map(|_| data.selection)
    }

    fn set_selection_range(&mut self, node: NodeId, start: usize, end: usize) {
        if let Some(data) = self.nodes.get_mut(&node) {
            if let Some(value) = &data.value {
                let len = value.chars().count();
                let end = end.min(len);
                data.selection = (start.min(end), end);
            }
        }
    }

    fn inner_text(&self, node: NodeId) -> String {
        let Some(data) = self.nodes.get(&node) else {
            return String::new();
        };
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&self.inner_text(*child));
        }
        text
    }

    fn set_inner_text(&mut self, node: NodeId, text: &str) {
        self.set_text_content(node, text);
    }

    fn text_selection_within(&self, node: NodeId) -> Option<(usize, usize)> {
        match self.text_selection {
            Some((anchor, start, end)) if anchor == node && self.contains(node) => {
                Some((start, end))
            }
            _ => None,
        }
    }

    fn set_text_selection(&mut self, node: NodeId, start: usize, end: usize) {
        let len = self.inner_text(node).chars().count();
        let end = end.min(len);
        self.text_selection = Some((node, start.min(end), end));
    }

    fn dispatch(&mut self, node: NodeId, event: DomEvent) {
        if self.contains(node) {
            self.events.push((node, event));
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.contains(node) {
            self.active = Some(node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|node| self.contains(*node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_remove() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let div = dom.append_new(body, "div");
        let inner = dom.append_new(div, "span");

        assert!(dom.contains(inner));
        assert_eq!(dom.last_child(body), Some(div));

        dom.remove(div);
        assert!(!dom.contains(div));
        assert!(!dom.contains(inner));
        assert_eq!(dom.parent(inner), Some(div));
    }

    #[test]
    fn test_append_moves_existing_child_to_end() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let first = dom.append_new(body, "div");
        let second = dom.append_new(body, "div");

        dom.append_child(body, first);
        assert_eq!(dom.children(body), vec![second, first]);
    }

    #[test]
    fn test_set_value_moves_caret_to_end() {
        let mut dom = MemoryDom::new();
        let input = dom.add_input(Some("text"), "hello");
        assert_eq!(dom.selection_range(input), Some((5, 5)));

        dom.set_selection_range(input, 4, 99);
        assert_eq!(dom.selection_range(input), Some((4, 5)));
    }

    #[test]
    fn test_non_controls_have_no_value() {
        let mut dom = MemoryDom::new();
        let div = dom.add_contenteditable("text");
        assert_eq!(dom.value(div), None);
        assert_eq!(dom.selection_range(div), None);
        assert_eq!(dom.inner_text(div), "text");
    }

    #[test]
    fn test_text_selection_scoped_to_node() {
        let mut dom = MemoryDom::new();
        let a = dom.add_contenteditable("alpha");
        let b = dom.add_contenteditable("beta");
        dom.set_text_selection(a, 1, 3);

        assert_eq!(dom.text_selection_within(a), Some((1, 3)));
        assert_eq!(dom.text_selection_within(b), None);
    }

    #[test]
    fn test_focus_cleared_when_node_removed() {
        let mut dom = MemoryDom::new();
        let input = dom.add_input(None, "");
        dom.focus(input);
        assert_eq!(dom.active_element(), Some(input));

        dom.remove(input);
        assert_eq!(dom.active_element(), None);
    }

    #[test]
    fn test_query_by_attribute_ignores_detached_nodes() {
        let mut dom = MemoryDom::new();
        let input = dom.add_input(None, "");
        dom.set_attribute(input, "data-mark", "7");
        assert_eq!(dom.query_by_attribute("data-mark", "7"), Some(input));

        dom.remove(input);
        assert_eq!(dom.query_by_attribute("data-mark", "7"), None);
    }
}
