pub mod gesture;
pub mod input;
pub mod session;
pub mod viewport;

pub use gesture::{Gesture, GestureRouter};
pub use input::{InputEvent, PointerButton};
pub use session::{ConnectionMode, Editor, Mutation, SelectedItem};
pub use viewport::{MAX_SCALE, MIN_SCALE, ViewportController, ZOOM_SENSITIVITY};
