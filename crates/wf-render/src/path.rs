//! Connection path geometry.
//!
//! Connections are drawn as cubic beziers between the endpoint nodes'
//! centers, with horizontal control handles whose reach grows with the
//! distance between the nodes (capped so long edges don't balloon).
//! Output is world-space; callers project through the view transform.

use kurbo::{BezPath, CubicBez};
use wf_core::geometry::Rect;

/// Maximum horizontal reach of a control handle.
pub const MAX_CONTROL_OFFSET: f32 = 150.0;

/// The world-space cubic for a connection between two node boxes.
pub fn connection_curve(from: Rect, to: Rect) -> CubicBez {
    let a = from.center();
    let b = to.center();

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let reach = (distance / 2.0).min(MAX_CONTROL_OFFSET);

    CubicBez::new(
        (a.x as f64, a.y as f64),
        ((a.x + reach) as f64, a.y as f64),
        ((b.x - reach) as f64, b.y as f64),
        (b.x as f64, b.y as f64),
    )
}

/// The connection curve as a `BezPath` (single move + cubic).
pub fn connection_path(from: Rect, to: Rect) -> BezPath {
    let c = connection_curve(from, to);
    let mut path = BezPath::new();
    path.move_to(c.p0);
    path.curve_to(c.p1, c.p2, c.p3);
    path
}

/// The connection curve as an SVG path string (`M .. C ..`).
pub fn connection_path_svg(from: Rect, to: Rect) -> String {
    connection_path(from, to).to_svg()
}
