//! The workflow graph model: nodes, connections, and notes.
//!
//! Nodes are stored as weights in a `StableDiGraph`; connections are the
//! graph's edge weights. Removing a node removes its incident edges with it,
//! so a connection can never outlive either endpoint — the cascade-delete
//! guarantee is structural, not checked on read paths.
//!
//! Every mutation is total: unknown ids are silent no-ops and out-of-range
//! sizes are clamped. Callers never need to handle an error from this module.

use crate::geometry::{Point, Rect, Size};
use crate::id::ObjectId;
use crate::registry;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node size floor, in world units.
pub const MIN_NODE_WIDTH: f32 = 200.0;
pub const MIN_NODE_HEIGHT: f32 = 120.0;

/// Nominal note extent (notes are not resizable).
pub const NOTE_WIDTH: f32 = 200.0;
pub const NOTE_HEIGHT: f32 = 120.0;

// ─── Connection points ───────────────────────────────────────────────────

/// Which role a connection point plays on its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Input,
    Output,
}

/// An anchor on the node box where connections attach.
/// `x`/`y` are fractions of the node's width/height (0.0 ..= 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub kind: PointKind,
    pub x: f32,
    pub y: f32,
}

impl ConnectionPoint {
    pub const fn new(kind: PointKind, x: f32, y: f32) -> Self {
        Self { kind, x, y }
    }
}

// ─── Styling ─────────────────────────────────────────────────────────────

/// Per-node color overrides. Hex strings, as persisted in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStyle {
    pub background: String,
    pub border: String,
    pub text: String,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            background: "#1a1f35".into(),
            border: "#2a3147".into(),
            text: "#ffffff".into(),
        }
    }
}

// ─── Nodes, connections, notes ───────────────────────────────────────────

/// A typed node on the canvas. Position is world-space; size respects
/// the `MIN_NODE_WIDTH`/`MIN_NODE_HEIGHT` floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub label: String,
    pub position: Point,
    pub size: Size,
    #[serde(default)]
    pub style: NodeStyle,
    #[serde(default)]
    pub connection_points: SmallVec<[ConnectionPoint; 2]>,
}

impl Node {
    /// The node's world-space bounding box.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

/// A directed edge between two nodes. Both endpoints exist at creation
/// time; deleting either endpoint deletes the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ObjectId,
    pub from: ObjectId,
    pub to: ObjectId,
}

/// A freestanding sticky note. Not connectable, not resizable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ObjectId,
    pub position: Point,
    pub text: String,
}

impl Note {
    /// Nominal bounding box used for hit testing.
    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, NOTE_WIDTH, NOTE_HEIGHT)
    }
}

// ─── Workflow ────────────────────────────────────────────────────────────

/// The complete diagram: node/connection graph plus notes.
///
/// Iteration order of `nodes()` is insertion order, which doubles as
/// z-order when rendering (later nodes draw on top).
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    graph: StableDiGraph<Node, Connection>,
    id_index: HashMap<ObjectId, NodeIndex>,
    conn_index: HashMap<ObjectId, EdgeIndex>,
    notes: Vec<Note>,
}

impl Workflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0 && self.notes.is_empty()
    }

    /// Nodes in insertion (z) order, back to front.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.graph.edge_weights()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn node(&self, id: ObjectId) -> Option<&Node> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn connection(&self, id: ObjectId) -> Option<&Connection> {
        self.conn_index.get(&id).and_then(|e| self.graph.edge_weight(*e))
    }

    pub fn note(&self, id: ObjectId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: ObjectId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// Allocate an id that is not used by any node, connection, or note.
    ///
    /// Imported documents may contain arbitrary ids (including ones that
    /// look generated), so the counter output is re-drawn until free.
    pub fn fresh_id(&self, prefix: &str) -> ObjectId {
        loop {
            let id = ObjectId::with_prefix(prefix);
            let occupied = self.id_index.contains_key(&id)
                || self.conn_index.contains_key(&id)
                || self.notes.iter().any(|n| n.id == id);
            if !occupied {
                return id;
            }
        }
    }

    // ─── Node mutations ──────────────────────────────────────────────────

    /// Instantiate a node of the given type at `position`, using the
    /// registry descriptor for label, size, style, and connection points.
    /// Unknown tags fall back to the default descriptor.
    pub fn add_node(&mut self, type_tag: &str, position: Point) -> ObjectId {
        let descriptor = registry::descriptor(type_tag);
        let node = Node {
            id: self.fresh_id("node"),
            type_tag: type_tag.to_string(),
            label: descriptor.label.to_string(),
            position,
            size: descriptor.default_size(),
            style: descriptor.style(),
            connection_points: descriptor.connection_layout.points(),
        };
        self.insert_node(node)
    }

    /// Insert a fully-formed node (import path). An existing node with the
    /// same id is replaced.
    pub fn insert_node(&mut self, node: Node) -> ObjectId {
        let id = node.id;
        if let Some(&old) = self.id_index.get(&id) {
            self.remove_node_index(old);
        }
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        id
    }

    /// Replace a node's position unconditionally. Unknown id → no-op.
    pub fn move_node(&mut self, id: ObjectId, position: Point) {
        if let Some(&idx) = self.id_index.get(&id) {
            self.graph[idx].position = position;
        }
    }

    /// Resize a node, clamping to the configured floor. Unknown id → no-op.
    pub fn resize_node(&mut self, id: ObjectId, width: f32, height: f32) {
        if let Some(&idx) = self.id_index.get(&id) {
            let node = &mut self.graph[idx];
            node.size.width = width.max(MIN_NODE_WIDTH);
            node.size.height = height.max(MIN_NODE_HEIGHT);
        }
    }

    /// Set a node's label to the trimmed text. Nodes may keep empty labels.
    pub fn edit_label(&mut self, id: ObjectId, text: &str) {
        if let Some(&idx) = self.id_index.get(&id) {
            self.graph[idx].label = text.trim().to_string();
        }
    }

    /// Delete a node and every connection referencing it.
    /// Returns true if the node existed.
    pub fn delete_node(&mut self, id: ObjectId) -> bool {
        match self.id_index.get(&id).copied() {
            Some(idx) => {
                self.remove_node_index(idx);
                true
            }
            None => false,
        }
    }

    fn remove_node_index(&mut self, idx: NodeIndex) {
        // Incident edges vanish with the node; drop their index entries first.
        let graph = &self.graph;
        self.conn_index.retain(|_, edge| {
            graph
                .edge_endpoints(*edge)
                .is_some_and(|(a, b)| a != idx && b != idx)
        });
        if let Some(node) = self.graph.remove_node(idx) {
            self.id_index.remove(&node.id);
        }
    }

    // ─── Connection mutations ────────────────────────────────────────────

    /// Connect `from` → `to`. Self-loops and unknown endpoints are
    /// rejected as no-ops. Returns the new connection's id on success.
    pub fn add_connection(&mut self, from: ObjectId, to: ObjectId) -> Option<ObjectId> {
        if from == to {
            log::debug!("rejecting self-loop connection on {from}");
            return None;
        }
        let (&a, &b) = (self.id_index.get(&from)?, self.id_index.get(&to)?);
        let id = self.fresh_id("conn");
        let edge = self.graph.add_edge(a, b, Connection { id, from, to });
        self.conn_index.insert(id, edge);
        Some(id)
    }

    /// Insert a connection with a caller-supplied id (import path).
    /// Endpoints must exist; self-loops are rejected.
    pub fn insert_connection(&mut self, conn: Connection) -> bool {
        if conn.from == conn.to {
            return false;
        }
        let (Some(&a), Some(&b)) = (self.id_index.get(&conn.from), self.id_index.get(&conn.to))
        else {
            return false;
        };
        let id = conn.id;
        if let Some(old) = self.conn_index.remove(&id) {
            self.graph.remove_edge(old);
        }
        let edge = self.graph.add_edge(a, b, conn);
        self.conn_index.insert(id, edge);
        true
    }

    /// Delete a connection. Returns true if it existed.
    pub fn delete_connection(&mut self, id: ObjectId) -> bool {
        match self.conn_index.remove(&id) {
            Some(edge) => self.graph.remove_edge(edge).is_some(),
            None => false,
        }
    }

    // ─── Note mutations ──────────────────────────────────────────────────

    pub fn add_note(&mut self, position: Point, text: &str) -> ObjectId {
        let id = self.fresh_id("note");
        self.notes.push(Note {
            id,
            position,
            text: text.to_string(),
        });
        id
    }

    /// Insert a fully-formed note (import path).
    pub fn insert_note(&mut self, note: Note) {
        self.notes.retain(|n| n.id != note.id);
        self.notes.push(note);
    }

    /// Update a note's text. A note whose text trims to empty is deleted
    /// instead of keeping the empty string.
    pub fn edit_note(&mut self, id: ObjectId, text: &str) {
        if text.trim().is_empty() {
            self.delete_note(id);
            return;
        }
        if let Some(note) = self.notes.iter_mut().find(|n| n.id == id) {
            note.text = text.to_string();
        }
    }

    /// Delete a note. Returns true if it existed.
    pub fn delete_note(&mut self, id: ObjectId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow_with(tags: &[&str]) -> (Workflow, Vec<ObjectId>) {
        let mut wf = Workflow::new();
        let ids = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| wf.add_node(tag, Point::new(i as f32 * 300.0, 0.0)))
            .collect();
        (wf, ids)
    }

    #[test]
    fn add_node_uses_registry_defaults() {
        let mut wf = Workflow::new();
        let id = wf.add_node("task", Point::new(100.0, 100.0));
        let node = wf.node(id).unwrap();
        assert_eq!(node.label, "Task");
        assert_eq!(node.size.width, MIN_NODE_WIDTH);
        assert!(!node.connection_points.is_empty());
    }

    #[test]
    fn unknown_type_falls_back_to_default_descriptor() {
        let mut wf = Workflow::new();
        let id = wf.add_node("definitely-not-registered", Point::ZERO);
        let node = wf.node(id).unwrap();
        assert_eq!(node.type_tag, "definitely-not-registered");
        assert!(node.size.width >= MIN_NODE_WIDTH);
    }

    #[test]
    fn move_replaces_position_unconditionally() {
        let (mut wf, ids) = workflow_with(&["task"]);
        wf.move_node(ids[0], Point::new(-50.0, 999.5));
        assert_eq!(wf.node(ids[0]).unwrap().position, Point::new(-50.0, 999.5));
    }

    #[test]
    fn move_unknown_id_is_noop() {
        let (mut wf, _) = workflow_with(&["task"]);
        wf.move_node(ObjectId::intern("ghost"), Point::ZERO);
        assert_eq!(wf.node_count(), 1);
    }

    #[test]
    fn resize_clamps_to_floor() {
        let (mut wf, ids) = workflow_with(&["task"]);
        wf.resize_node(ids[0], -4000.0, 10.0);
        let node = wf.node(ids[0]).unwrap();
        assert_eq!(node.size.width, MIN_NODE_WIDTH);
        assert_eq!(node.size.height, MIN_NODE_HEIGHT);

        wf.resize_node(ids[0], 450.0, 320.0);
        let node = wf.node(ids[0]).unwrap();
        assert_eq!(node.size.width, 450.0);
        assert_eq!(node.size.height, 320.0);
    }

    #[test]
    fn self_loop_rejected() {
        let (mut wf, ids) = workflow_with(&["task"]);
        assert_eq!(wf.add_connection(ids[0], ids[0]), None);
        assert_eq!(wf.connection_count(), 0);
    }

    #[test]
    fn connection_to_unknown_endpoint_rejected() {
        let (mut wf, ids) = workflow_with(&["task"]);
        assert_eq!(wf.add_connection(ids[0], ObjectId::intern("nope")), None);
        assert_eq!(wf.connection_count(), 0);
    }

    #[test]
    fn delete_node_cascades_to_connections() {
        let (mut wf, ids) = workflow_with(&["task", "milestone", "approval"]);
        let c_ab = wf.add_connection(ids[0], ids[1]).unwrap();
        let c_ba = wf.add_connection(ids[1], ids[0]).unwrap();
        let c_bc = wf.add_connection(ids[1], ids[2]).unwrap();

        assert!(wf.delete_node(ids[0]));

        // Both connections touching A are gone; B→C survives.
        assert!(wf.connection(c_ab).is_none());
        assert!(wf.connection(c_ba).is_none());
        assert!(wf.connection(c_bc).is_some());
        assert_eq!(wf.node_count(), 2);
        assert_eq!(wf.connection_count(), 1);
    }

    #[test]
    fn delete_scenario_two_nodes_one_connection() {
        let (mut wf, ids) = workflow_with(&["task", "milestone"]);
        wf.add_connection(ids[0], ids[1]).unwrap();

        wf.delete_node(ids[0]);

        let remaining: Vec<_> = wf.nodes().map(|n| n.id).collect();
        assert_eq!(remaining, vec![ids[1]]);
        assert_eq!(wf.connections().count(), 0);
    }

    #[test]
    fn note_edit_to_empty_deletes_it() {
        let mut wf = Workflow::new();
        let id = wf.add_note(Point::new(10.0, 10.0), "remember");
        wf.edit_note(id, "   \n ");
        assert!(wf.note(id).is_none());
    }

    #[test]
    fn note_edit_keeps_nonempty_text() {
        let mut wf = Workflow::new();
        let id = wf.add_note(Point::ZERO, "draft");
        wf.edit_note(id, "final text");
        assert_eq!(wf.note(id).unwrap().text, "final text");
    }

    #[test]
    fn node_label_may_become_empty() {
        let (mut wf, ids) = workflow_with(&["task"]);
        wf.edit_label(ids[0], "   ");
        assert_eq!(wf.node(ids[0]).unwrap().label, "");
        assert!(wf.node(ids[0]).is_some());
    }

    #[test]
    fn fresh_id_skips_occupied_ids() {
        let mut wf = Workflow::new();
        // Simulate an import that claimed a counter-shaped id.
        wf.insert_node(Node {
            id: ObjectId::intern("probe_0"),
            type_tag: "task".into(),
            label: "Imported".into(),
            position: Point::ZERO,
            size: Size::new(200.0, 120.0),
            style: NodeStyle::default(),
            connection_points: SmallVec::new(),
        });
        // Burn ids until the counter passes the taken one; none may collide.
        for _ in 0..4 {
            let id = wf.fresh_id("probe");
            assert_ne!(id, ObjectId::intern("probe_0"));
        }
    }

    #[test]
    fn z_order_is_insertion_order() {
        let (wf, ids) = workflow_with(&["task", "milestone", "gateway"]);
        let order: Vec<_> = wf.nodes().map(|n| n.id).collect();
        assert_eq!(order, ids);
    }
}
