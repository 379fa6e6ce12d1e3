//! Hit testing: screen point → topmost object.
//!
//! Resolution order mirrors paint order, front to back: the selected
//! node's resize handle, then notes, then nodes in reverse z-order, then
//! connection curves, and finally the bare canvas. Input is screen-space;
//! object geometry lives in world space, so the point is converted once
//! through the view transform.

use crate::path::connection_curve;
use kurbo::ParamCurve;
use wf_core::geometry::{Point, Rect};
use wf_core::id::ObjectId;
use wf_core::model::Workflow;
use wf_core::transform::{ViewTransform, screen_to_world, world_to_screen};

/// Resize handle extent, in screen pixels.
pub const RESIZE_HANDLE_SIZE: f32 = 12.0;

/// How close (screen px) the pointer must come to a connection curve.
pub const CONNECTION_HIT_TOLERANCE: f32 = 6.0;

/// Sample count for curve distance checks.
const CURVE_SAMPLES: usize = 24;

/// What a pointer position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The bottom-right resize handle of the selected node.
    ResizeHandle(ObjectId),
    Node(ObjectId),
    Note(ObjectId),
    Connection(ObjectId),
    Canvas,
}

/// Resolve the topmost object under a screen point.
///
/// `selected` gates the resize handle: only the selected node shows one.
pub fn hit_test(
    wf: &Workflow,
    t: &ViewTransform,
    screen: Point,
    selected: Option<ObjectId>,
) -> HitTarget {
    // Resize handle first — it overlaps its node's corner and must win.
    if let Some(id) = selected
        && let Some(node) = wf.node(id)
        && handle_box(node.rect(), t).contains(screen)
    {
        return HitTarget::ResizeHandle(id);
    }

    let world = screen_to_world(screen, t);

    // Notes draw above nodes; later entries are topmost.
    for note in wf.notes().iter().rev() {
        if note.rect().contains(world) {
            return HitTarget::Note(note.id);
        }
    }

    // Nodes in reverse z-order (last inserted is topmost).
    let nodes: Vec<_> = wf.nodes().collect();
    for node in nodes.iter().rev() {
        if node.rect().contains(world) {
            return HitTarget::Node(node.id);
        }
    }

    // Connections: nearest sampled curve within tolerance.
    let tolerance = CONNECTION_HIT_TOLERANCE / t.scale;
    let mut best: Option<(ObjectId, f32)> = None;
    for conn in wf.connections() {
        let (Some(from), Some(to)) = (wf.node(conn.from), wf.node(conn.to)) else {
            continue;
        };
        let d = curve_distance(from.rect(), to.rect(), world);
        if d <= tolerance && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((conn.id, d));
        }
    }
    if let Some((id, _)) = best {
        return HitTarget::Connection(id);
    }

    HitTarget::Canvas
}

/// The screen-space box of a node's resize handle, centered on the node's
/// bottom-right corner. The handle has a fixed on-screen size regardless
/// of zoom.
fn handle_box(node_rect: Rect, t: &ViewTransform) -> Rect {
    let corner = world_to_screen(
        Point::new(node_rect.x + node_rect.width, node_rect.y + node_rect.height),
        t,
    );
    Rect::new(
        corner.x - RESIZE_HANDLE_SIZE / 2.0,
        corner.y - RESIZE_HANDLE_SIZE / 2.0,
        RESIZE_HANDLE_SIZE,
        RESIZE_HANDLE_SIZE,
    )
}

/// Minimum distance from `p` to the sampled connection curve.
fn curve_distance(from: Rect, to: Rect, p: Point) -> f32 {
    let curve = connection_curve(from, to);
    let mut best = f32::MAX;
    for i in 0..=CURVE_SAMPLES {
        let s = curve.eval(i as f64 / CURVE_SAMPLES as f64);
        let dx = s.x as f32 - p.x;
        let dy = s.y as f32 - p.y;
        best = best.min((dx * dx + dy * dy).sqrt());
    }
    best
}
