//! Gesture state machine.
//!
//! One authoritative tagged union replaces the pile of `is_dragging` /
//! `is_resizing` booleans a UI would otherwise have to keep consistent by
//! convention: two gestures being active at once is unrepresentable. The
//! router turns pointer movement into [`Mutation`] commands; the session
//! applies them to the workflow.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> DraggingNode    (primary pointer-down on a node body)
//! Idle -> ResizingNode    (primary pointer-down on the resize handle)
//! Idle -> PanningCanvas   (primary pointer-down on empty canvas)
//!
//! Any  -> Idle            (pointer-up / pointer-leave, or the referenced
//!                          node is deleted out from under the gesture)
//! ```
//!
//! Connection drawing is *not* a pointer-captured state: it is the
//! session's click-click `ConnectionMode`, which must survive pointer-up
//! between the two clicks.

use crate::session::Mutation;
use wf_core::geometry::{Point, Size};
use wf_core::id::ObjectId;
use wf_core::model::{MIN_NODE_HEIGHT, MIN_NODE_WIDTH};
use wf_core::transform::{ViewTransform, screen_to_world};

/// The single active interaction, with the anchors captured at its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,

    /// The canvas itself is being panned (state lives in the viewport
    /// controller; this variant exists so panning excludes object drags).
    PanningCanvas,

    /// A node is being dragged. Anchors are the pointer's world position
    /// and the node's position at gesture start.
    DraggingNode {
        id: ObjectId,
        start_world: Point,
        node_start: Point,
    },

    /// A node is being resized from its bottom-right handle. The pointer
    /// anchor is raw screen-space; deltas are divided by the current scale
    /// before they are added to the size, so a handle drag grows the node
    /// by the same visual amount at every zoom level.
    ResizingNode {
        id: ObjectId,
        start_screen: Point,
        start_size: Size,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while a gesture owns a graph object (drag or resize). Panning
    /// is canvas-level, not object-level.
    pub fn is_object_gesture(&self) -> bool {
        matches!(self, Self::DraggingNode { .. } | Self::ResizingNode { .. })
    }

    /// The node the gesture references, if any.
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::DraggingNode { id, .. } | Self::ResizingNode { id, .. } => Some(*id),
            _ => None,
        }
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}

/// Routes pointer events to the active gesture.
#[derive(Debug, Clone, Default)]
pub struct GestureRouter {
    current: Gesture,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Gesture {
        &self.current
    }

    pub fn is_object_gesture(&self) -> bool {
        self.current.is_object_gesture()
    }

    /// Begin dragging `id`. Captures the pointer's world position through
    /// the transform at gesture start plus the node's current position.
    pub fn begin_node_drag(
        &mut self,
        id: ObjectId,
        screen: Point,
        t: &ViewTransform,
        node_start: Point,
    ) {
        self.current = Gesture::DraggingNode {
            id,
            start_world: screen_to_world(screen, t),
            node_start,
        };
        log::debug!("drag start on {id}");
    }

    /// Begin resizing `id` from its handle. Captures raw screen position
    /// and the node's current size.
    pub fn begin_node_resize(&mut self, id: ObjectId, screen: Point, start_size: Size) {
        self.current = Gesture::ResizingNode {
            id,
            start_screen: screen,
            start_size,
        };
        log::debug!("resize start on {id}");
    }

    pub fn begin_canvas_pan(&mut self) {
        self.current = Gesture::PanningCanvas;
    }

    /// Route a pointer move. Emits the mutation for the active gesture;
    /// a move that hasn't left the start point still emits the (zero)
    /// move — there is no click-vs-drag suppression for node dragging.
    pub fn on_pointer_move(&mut self, screen: Point, t: &ViewTransform) -> Option<Mutation> {
        match self.current {
            Gesture::DraggingNode {
                id,
                start_world,
                node_start,
            } => {
                let delta = screen_to_world(screen, t) - start_world;
                Some(Mutation::MoveNode {
                    id,
                    position: node_start + delta,
                })
            }
            Gesture::ResizingNode {
                id,
                start_screen,
                start_size,
            } => {
                let dx = (screen.x - start_screen.x) / t.scale;
                let dy = (screen.y - start_screen.y) / t.scale;
                Some(Mutation::ResizeNode {
                    id,
                    width: (start_size.width + dx).max(MIN_NODE_WIDTH),
                    height: (start_size.height + dy).max(MIN_NODE_HEIGHT),
                })
            }
            Gesture::PanningCanvas | Gesture::Idle => None,
        }
    }

    /// Pointer released or left the canvas: back to idle, anchors cleared.
    pub fn finish(&mut self) {
        self.current = Gesture::Idle;
    }

    /// Force the machine back to idle if the active gesture references
    /// `id`. Called when a node is deleted mid-gesture so no dangling
    /// gesture state survives the delete. Returns true if a gesture was
    /// cancelled.
    pub fn cancel_if_references(&mut self, id: ObjectId) -> bool {
        if self.current.target() == Some(id) {
            log::debug!("gesture target {id} deleted, returning to idle");
            self.current = Gesture::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_transform() -> ViewTransform {
        ViewTransform::default()
    }

    #[test]
    fn drag_emits_anchored_moves() {
        let mut router = GestureRouter::new();
        let id = ObjectId::intern("drag_me");
        let t = world_transform();

        router.begin_node_drag(id, Point::new(150.0, 150.0), &t, Point::new(100.0, 100.0));

        // Pointer moves by world-delta (50, -20).
        let m = router.on_pointer_move(Point::new(200.0, 130.0), &t).unwrap();
        assert_eq!(
            m,
            Mutation::MoveNode {
                id,
                position: Point::new(150.0, 80.0),
            }
        );

        // Deltas stay anchored to the start, not the previous move.
        let m = router.on_pointer_move(Point::new(160.0, 150.0), &t).unwrap();
        assert_eq!(
            m,
            Mutation::MoveNode {
                id,
                position: Point::new(110.0, 100.0),
            }
        );
    }

    #[test]
    fn drag_anchors_account_for_zoom() {
        let mut router = GestureRouter::new();
        let id = ObjectId::intern("zoomed_drag");
        let t = ViewTransform {
            scale: 2.0,
            offset: Point::new(50.0, 0.0),
        };

        router.begin_node_drag(id, Point::new(250.0, 200.0), &t, Point::new(0.0, 0.0));

        // 100 screen px at scale 2 is 50 world units.
        let m = router.on_pointer_move(Point::new(350.0, 200.0), &t).unwrap();
        assert_eq!(
            m,
            Mutation::MoveNode {
                id,
                position: Point::new(50.0, 0.0),
            }
        );
    }

    #[test]
    fn zero_move_drag_still_commits() {
        let mut router = GestureRouter::new();
        let id = ObjectId::intern("click_only");
        let t = world_transform();

        router.begin_node_drag(id, Point::new(10.0, 10.0), &t, Point::new(5.0, 5.0));
        let m = router.on_pointer_move(Point::new(10.0, 10.0), &t).unwrap();
        assert_eq!(
            m,
            Mutation::MoveNode {
                id,
                position: Point::new(5.0, 5.0),
            }
        );
    }

    #[test]
    fn resize_divides_screen_delta_by_scale() {
        let mut router = GestureRouter::new();
        let id = ObjectId::intern("resize_me");
        let t = ViewTransform {
            scale: 2.0,
            offset: Point::ZERO,
        };

        router.begin_node_resize(id, Point::new(400.0, 240.0), Size::new(200.0, 120.0));
        let m = router.on_pointer_move(Point::new(500.0, 280.0), &t).unwrap();
        assert_eq!(
            m,
            Mutation::ResizeNode {
                id,
                width: 250.0,
                height: 140.0,
            }
        );
    }

    #[test]
    fn resize_floors_regardless_of_delta() {
        let mut router = GestureRouter::new();
        let id = ObjectId::intern("shrink_me");
        let t = world_transform();

        router.begin_node_resize(id, Point::new(0.0, 0.0), Size::new(300.0, 200.0));
        let m = router
            .on_pointer_move(Point::new(-10000.0, -10000.0), &t)
            .unwrap();
        assert_eq!(
            m,
            Mutation::ResizeNode {
                id,
                width: MIN_NODE_WIDTH,
                height: MIN_NODE_HEIGHT,
            }
        );
    }

    #[test]
    fn finish_returns_to_idle() {
        let mut router = GestureRouter::new();
        let t = world_transform();
        router.begin_node_drag(ObjectId::intern("x"), Point::ZERO, &t, Point::ZERO);
        assert!(router.is_object_gesture());

        router.finish();
        assert!(router.current().is_idle());
        assert!(router.on_pointer_move(Point::new(5.0, 5.0), &t).is_none());
    }

    #[test]
    fn cancel_only_matches_referenced_node() {
        let mut router = GestureRouter::new();
        let t = world_transform();
        let dragged = ObjectId::intern("dragged");
        router.begin_node_drag(dragged, Point::ZERO, &t, Point::ZERO);

        assert!(!router.cancel_if_references(ObjectId::intern("other")));
        assert!(router.is_object_gesture());

        assert!(router.cancel_if_references(dragged));
        assert!(router.current().is_idle());
    }

    #[test]
    fn panning_emits_no_mutations() {
        let mut router = GestureRouter::new();
        router.begin_canvas_pan();
        let t = world_transform();
        assert!(router.on_pointer_move(Point::new(40.0, 40.0), &t).is_none());
        assert!(!router.is_object_gesture());
    }
}
