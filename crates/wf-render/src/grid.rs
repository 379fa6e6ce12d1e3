//! Grid layer derivation.
//!
//! Derives the visible grid line geometry from the current transform and
//! viewport size. The grid pans with the offset but keeps a fixed on-screen
//! spacing; zoom level only drives the fade (opacity) and the suppression
//! of minor lines when zoomed far out. Consumers redraw the whole layer on
//! every transform or viewport change — line count is bounded by
//! viewport size / spacing, never by graph size.

use kurbo::BezPath;
use wf_core::geometry::Size;
use wf_core::transform::ViewTransform;

/// Minor grid spacing in grid units (on-screen pixels).
pub const MINOR_SPACING: f32 = 20.0;
/// Major grid spacing — every fifth minor line.
pub const MAJOR_SPACING: f32 = MINOR_SPACING * 5.0;

/// Scale below which minor lines are suppressed entirely.
const MINOR_CUTOFF_SCALE: f32 = 0.7;

/// Style parameters derived from the zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub minor_spacing: f32,
    pub major_spacing: f32,
    pub minor_opacity: f32,
    pub major_opacity: f32,
    pub minor_width: f32,
    pub major_width: f32,
}

/// Compute the scale-dependent grid style.
///
/// Opacity fades as the view zooms out; minor lines vanish below
/// `scale < 0.7` to avoid visual noise.
pub fn grid_params(scale: f32) -> GridParams {
    GridParams {
        minor_spacing: MINOR_SPACING,
        major_spacing: MAJOR_SPACING,
        minor_opacity: (0.5 / (scale * 0.5)).min(0.5),
        major_opacity: (1.0 / (scale * 0.5)).min(1.0),
        minor_width: if scale < MINOR_CUTOFF_SCALE { 0.0 } else { 1.0 },
        major_width: 1.0,
    }
}

/// The grid layer: minor and major line sets in screen space, plus the
/// style params they should be stroked with.
#[derive(Debug, Clone)]
pub struct GridLayer {
    pub minor: BezPath,
    pub major: BezPath,
    pub params: GridParams,
}

/// Derive the full grid layer for the current view.
pub fn grid_layer(t: &ViewTransform, viewport: Size) -> GridLayer {
    let params = grid_params(t.scale);

    // Visible range in pan space (offset-translated, unscaled), snapped to
    // the minor spacing so lines stay put while panning.
    let start_x = (-t.offset.x / MINOR_SPACING).floor() * MINOR_SPACING;
    let start_y = (-t.offset.y / MINOR_SPACING).floor() * MINOR_SPACING;
    let end_x = ((viewport.width - t.offset.x) / MINOR_SPACING).ceil() * MINOR_SPACING;
    let end_y = ((viewport.height - t.offset.y) / MINOR_SPACING).ceil() * MINOR_SPACING;

    let mut minor = BezPath::new();
    if params.minor_width > 0.0 {
        line_set(&mut minor, start_x, start_y, end_x, end_y, MINOR_SPACING, t);
    }

    let mut major = BezPath::new();
    line_set(&mut major, start_x, start_y, end_x, end_y, MAJOR_SPACING, t);

    GridLayer {
        minor,
        major,
        params,
    }
}

/// Append vertical + horizontal lines covering the range at `spacing`,
/// translated into screen space.
fn line_set(
    path: &mut BezPath,
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    spacing: f32,
    t: &ViewTransform,
) {
    let mut x = start_x;
    while x <= end_x {
        path.move_to(((x + t.offset.x) as f64, (start_y + t.offset.y) as f64));
        path.line_to(((x + t.offset.x) as f64, (end_y + t.offset.y) as f64));
        x += spacing;
    }

    let mut y = start_y;
    while y <= end_y {
        path.move_to(((start_x + t.offset.x) as f64, (y + t.offset.y) as f64));
        path.line_to(((end_x + t.offset.x) as f64, (y + t.offset.y) as f64));
        y += spacing;
    }
}
