//! The editor session: one struct owning the workflow, the viewport, the
//! gesture machine, and the UI-session state (selection + connection mode).
//!
//! `handle_event` is the single entry point for the pointer/wheel stream.
//! Every event is hit-tested against the current workflow and transform,
//! then routed to exactly one of: the viewport controller (pan/zoom), the
//! gesture router (drag/resize), or the connection-mode click protocol.
//! Mutations produced along the way are applied here, keeping the model a
//! pure collection type.

use crate::gesture::{Gesture, GestureRouter};
use crate::input::{InputEvent, PointerButton};
use crate::viewport::ViewportController;
use wf_core::geometry::Point;
use wf_core::id::ObjectId;
use wf_core::model::Workflow;
use wf_core::persist;
use wf_core::transform::ViewTransform;
use wf_render::hit::{HitTarget, hit_test};

/// Where newly added nodes land, in world space.
const NODE_SPAWN_POSITION: Point = Point::new(100.0, 100.0);

/// The single selected item, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedItem {
    Node(ObjectId),
    Connection(ObjectId),
    Note(ObjectId),
}

impl SelectedItem {
    pub fn id(&self) -> ObjectId {
        match self {
            Self::Node(id) | Self::Connection(id) | Self::Note(id) => *id,
        }
    }
}

/// The in-progress connection-draw state. Click a source node, then a
/// target node; the mode survives pointer-ups in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionMode {
    pub active: bool,
    pub source: Option<ObjectId>,
}

impl ConnectionMode {
    fn armed() -> Self {
        Self {
            active: true,
            source: None,
        }
    }
}

/// A mutation produced by the gesture router or the click protocol and
/// applied to the workflow by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    MoveNode { id: ObjectId, position: Point },
    ResizeNode { id: ObjectId, width: f32, height: f32 },
    AddConnection { from: ObjectId, to: ObjectId },
}

/// The editor session. UI frontends drive it with [`InputEvent`]s and the
/// command API below, and read back nodes/connections/notes, the
/// transform, the selection, and the connection mode after each event.
#[derive(Debug, Default)]
pub struct Editor {
    workflow: Workflow,
    viewport: ViewportController,
    gesture: GestureRouter,
    selection: Option<SelectedItem>,
    connection_mode: ConnectionMode,
    dirty: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing workflow (autosave restore, import).
    pub fn with_workflow(workflow: Workflow) -> Self {
        Self {
            workflow,
            ..Self::default()
        }
    }

    // ─── Read access ─────────────────────────────────────────────────────

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn transform(&self) -> &ViewTransform {
        self.viewport.transform()
    }

    pub fn scale(&self) -> f32 {
        self.viewport.scale()
    }

    pub fn offset(&self) -> Point {
        self.viewport.offset()
    }

    pub fn selection(&self) -> Option<SelectedItem> {
        self.selection
    }

    pub fn connection_mode(&self) -> ConnectionMode {
        self.connection_mode
    }

    pub fn gesture(&self) -> &Gesture {
        self.gesture.current()
    }

    /// True when the workflow changed since the last `clear_dirty`.
    /// Hosts use this to drive autosave.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ─── Event routing ───────────────────────────────────────────────────

    /// Process one input event to completion.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Wheel { x, y, delta_y } => {
                // Zoom moves the offset; deferring it keeps the viewport
                // frozen (and the drag anchors valid) for the whole
                // lifetime of an object gesture.
                if self.gesture.is_object_gesture() {
                    return;
                }
                self.viewport.on_wheel(Point::new(x, y), delta_y);
            }
            InputEvent::PointerDown { x, y, button } => {
                self.on_pointer_down(Point::new(x, y), button);
            }
            InputEvent::PointerMove { x, y } => {
                let pos = Point::new(x, y);
                self.viewport.on_pointer_move(pos);
                if let Some(m) = self.gesture.on_pointer_move(pos, self.viewport.transform()) {
                    self.apply(m);
                }
            }
            InputEvent::PointerUp { .. } => {
                self.viewport.on_pointer_up();
                self.gesture.finish();
            }
            InputEvent::PointerLeave => {
                self.viewport.on_pointer_leave();
                self.gesture.finish();
            }
        }
    }

    fn on_pointer_down(&mut self, pos: Point, button: PointerButton) {
        let selected_node = match self.selection {
            Some(SelectedItem::Node(id)) => Some(id),
            _ => None,
        };
        let hit = hit_test(&self.workflow, self.viewport.transform(), pos, selected_node);

        match hit {
            // A pointer-down that starts on a node with a non-primary
            // button is ignored entirely.
            HitTarget::Node(_) | HitTarget::ResizeHandle(_) | HitTarget::Note(_)
                if button != PointerButton::Primary => {}

            HitTarget::ResizeHandle(id) => {
                if let Some(node) = self.workflow.node(id) {
                    self.gesture.begin_node_resize(id, pos, node.size);
                }
            }

            HitTarget::Node(id) => {
                if self.connection_mode.active {
                    self.connection_click(id);
                } else if let Some(node) = self.workflow.node(id) {
                    // Selection fires on pointer-down, independent of
                    // whether the drag ever moves.
                    self.selection = Some(SelectedItem::Node(id));
                    self.gesture.begin_node_drag(
                        id,
                        pos,
                        self.viewport.transform(),
                        node.position,
                    );
                }
            }

            HitTarget::Note(id) => {
                self.selection = Some(SelectedItem::Note(id));
            }

            HitTarget::Connection(id) => {
                if button == PointerButton::Primary {
                    self.selection = Some(SelectedItem::Connection(id));
                }
            }

            HitTarget::Canvas => {
                if button == PointerButton::Primary {
                    self.selection = None;
                    self.gesture.begin_canvas_pan();
                    self.viewport
                        .on_pointer_down(pos, button, self.gesture.is_object_gesture());
                }
            }
        }
    }

    /// The click-click connection protocol: first node click arms the
    /// source, a click on a different node creates the connection and
    /// resets the mode, a click on the same node is a no-op.
    fn connection_click(&mut self, id: ObjectId) {
        match self.connection_mode.source {
            None => {
                self.connection_mode.source = Some(id);
            }
            Some(source) if source == id => {}
            Some(source) => {
                self.apply(Mutation::AddConnection {
                    from: source,
                    to: id,
                });
                self.connection_mode = ConnectionMode::default();
            }
        }
    }

    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::MoveNode { id, position } => self.workflow.move_node(id, position),
            Mutation::ResizeNode { id, width, height } => {
                self.workflow.resize_node(id, width, height)
            }
            Mutation::AddConnection { from, to } => {
                self.workflow.add_connection(from, to);
            }
        }
        self.dirty = true;
    }

    // ─── Command API (frontends: toolbar, library, inline edit) ──────────

    /// Add a node of `type_tag` at the default spawn position.
    pub fn add_node(&mut self, type_tag: &str) -> ObjectId {
        self.add_node_at(type_tag, NODE_SPAWN_POSITION)
    }

    pub fn add_node_at(&mut self, type_tag: &str, position: Point) -> ObjectId {
        self.dirty = true;
        self.workflow.add_node(type_tag, position)
    }

    pub fn move_node(&mut self, id: ObjectId, position: Point) {
        self.apply(Mutation::MoveNode { id, position });
    }

    pub fn resize_node(&mut self, id: ObjectId, width: f32, height: f32) {
        self.apply(Mutation::ResizeNode { id, width, height });
    }

    pub fn edit_label(&mut self, id: ObjectId, text: &str) {
        self.workflow.edit_label(id, text);
        self.dirty = true;
    }

    /// Delete a node. Cascades to its connections, clears any selection
    /// that no longer resolves, and — if the node is the target of the
    /// active gesture or the armed connection source — resets those too,
    /// so no dangling references survive a programmatic delete.
    pub fn delete_node(&mut self, id: ObjectId) {
        if self.workflow.delete_node(id) {
            self.dirty = true;
        }
        self.gesture.cancel_if_references(id);
        if self.connection_mode.source == Some(id) {
            self.connection_mode = ConnectionMode::default();
        }
        self.validate_selection();
    }

    pub fn add_connection(&mut self, from: ObjectId, to: ObjectId) -> Option<ObjectId> {
        let created = self.workflow.add_connection(from, to);
        if created.is_some() {
            self.dirty = true;
        }
        created
    }

    pub fn delete_connection(&mut self, id: ObjectId) {
        if self.workflow.delete_connection(id) {
            self.dirty = true;
        }
        self.validate_selection();
    }

    pub fn add_note(&mut self, position: Point, text: &str) -> ObjectId {
        self.dirty = true;
        self.workflow.add_note(position, text)
    }

    /// Commit a note edit. Text that trims to empty deletes the note
    /// (blur-with-empty-text in the UI).
    pub fn edit_note(&mut self, id: ObjectId, text: &str) {
        self.workflow.edit_note(id, text);
        self.dirty = true;
        self.validate_selection();
    }

    pub fn delete_note(&mut self, id: ObjectId) {
        if self.workflow.delete_note(id) {
            self.dirty = true;
        }
        self.validate_selection();
    }

    /// Arm connection-draw mode: the next node click picks the source.
    pub fn begin_connection(&mut self) {
        self.connection_mode = ConnectionMode::armed();
    }

    pub fn cancel_connection(&mut self) {
        self.connection_mode = ConnectionMode::default();
    }

    /// Explicitly clear the selection.
    pub fn deselect(&mut self) {
        self.selection = None;
    }

    // ─── Import / export ─────────────────────────────────────────────────

    /// Replace the workflow with an imported document. On a validation
    /// error the current workflow, selection, and gesture state are left
    /// untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), String> {
        let workflow = persist::import_document(json)?;
        self.workflow = workflow;
        self.selection = None;
        self.connection_mode = ConnectionMode::default();
        self.gesture.finish();
        self.dirty = true;
        Ok(())
    }

    pub fn export_json(&self) -> String {
        persist::export_json(&self.workflow)
    }

    // ─── Undo / redo (stubs) ─────────────────────────────────────────────

    // History is not implemented; the surface exists so frontends can wire
    // their buttons and stay disabled.

    pub fn can_undo(&self) -> bool {
        false
    }

    pub fn can_redo(&self) -> bool {
        false
    }

    pub fn undo(&mut self) -> bool {
        false
    }

    pub fn redo(&mut self) -> bool {
        false
    }

    /// Drop any selection that no longer resolves against the workflow
    /// (deleted directly, or swept away by a cascade).
    fn validate_selection(&mut self) {
        let still_there = match self.selection {
            None => true,
            Some(SelectedItem::Node(id)) => self.workflow.node(id).is_some(),
            Some(SelectedItem::Connection(id)) => self.workflow.connection(id).is_some(),
            Some(SelectedItem::Note(id)) => self.workflow.note(id).is_some(),
        };
        if !still_there {
            self.selection = None;
        }
    }
}
