pub mod geometry;
pub mod id;
pub mod model;
pub mod persist;
pub mod registry;
pub mod storage;
pub mod theme;
pub mod transform;

pub use geometry::{Point, Rect, Size};
pub use id::ObjectId;
pub use model::{
    Connection, ConnectionPoint, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, NOTE_HEIGHT, NOTE_WIDTH, Node,
    NodeStyle, Note, PointKind, Workflow,
};
pub use persist::{WorkflowDoc, export_json, import_document, import_file};
pub use registry::{CATEGORIES, Category, ConnectionLayout, NODE_TYPES, NodeType, descriptor};
pub use storage::Storage;
pub use theme::{PREDEFINED, Theme};
pub use transform::{ViewTransform, screen_to_world, world_to_screen, zoom_about};
