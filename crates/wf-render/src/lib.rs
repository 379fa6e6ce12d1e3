pub mod grid;
pub mod hit;
pub mod path;

pub use grid::{GridLayer, GridParams, MAJOR_SPACING, MINOR_SPACING, grid_layer, grid_params};
pub use hit::{CONNECTION_HIT_TOLERANCE, HitTarget, RESIZE_HANDLE_SIZE, hit_test};
pub use path::{MAX_CONTROL_OFFSET, connection_curve, connection_path, connection_path_svg};
