//! Screen ↔ world coordinate conversion.
//!
//! The canvas is infinite: world coordinates are mapped onto the screen by a
//! single uniform scale plus a pixel offset. These functions are pure — the
//! viewport controller owns the live `ViewTransform` and is the only writer.
//!
//! Scale bounds are the caller's concern: `zoom_about` trusts that
//! `new_scale` was already clamped.

use crate::geometry::Point;

/// The continuous view state: zoom factor and pan offset (screen pixels).
///
/// Invariant: `scale > 0`. The offset is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
        }
    }
}

/// Map a screen-space point into world space.
pub fn screen_to_world(p: Point, t: &ViewTransform) -> Point {
    Point::new((p.x - t.offset.x) / t.scale, (p.y - t.offset.y) / t.scale)
}

/// Map a world-space point onto the screen.
pub fn world_to_screen(p: Point, t: &ViewTransform) -> Point {
    Point::new(p.x * t.scale + t.offset.x, p.y * t.scale + t.offset.y)
}

/// Zoom to `new_scale`, keeping the world point under `anchor` (a screen
/// point) visually fixed. Returns the adjusted transform.
pub fn zoom_about(t: &ViewTransform, anchor: Point, new_scale: f32) -> ViewTransform {
    let world_anchor = screen_to_world(anchor, t);
    ViewTransform {
        scale: new_scale,
        offset: Point::new(
            anchor.x - world_anchor.x * new_scale,
            anchor.y - world_anchor.y * new_scale,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn roundtrip_world_screen_world() {
        let transforms = [
            ViewTransform::default(),
            ViewTransform {
                scale: 2.5,
                offset: Point::new(-340.0, 120.0),
            },
            ViewTransform {
                scale: 0.1,
                offset: Point::new(9999.0, -9999.0),
            },
        ];
        let points = [
            Point::ZERO,
            Point::new(400.0, 300.0),
            Point::new(-1532.25, 78.5),
        ];

        for t in &transforms {
            for &w in &points {
                let back = screen_to_world(world_to_screen(w, t), t);
                assert!(close(back, w), "round-trip failed: {w:?} -> {back:?} at {t:?}");
            }
        }
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let t = ViewTransform {
            scale: 0.8,
            offset: Point::new(52.0, -17.0),
        };
        let anchor = Point::new(400.0, 300.0);

        for new_scale in [0.1, 0.5, 1.0, 3.3, 5.0] {
            let zoomed = zoom_about(&t, anchor, new_scale);
            let before = screen_to_world(anchor, &t);
            let after = screen_to_world(anchor, &zoomed);
            assert!(
                close(before, after),
                "anchor drifted at scale {new_scale}: {before:?} -> {after:?}"
            );
            assert_eq!(zoomed.scale, new_scale);
        }
    }

    #[test]
    fn zoom_about_identity_scale_keeps_offset() {
        let t = ViewTransform {
            scale: 1.5,
            offset: Point::new(10.0, 20.0),
        };
        let zoomed = zoom_about(&t, Point::new(100.0, 100.0), 1.5);
        assert!(close(zoomed.offset, t.offset));
    }
}
