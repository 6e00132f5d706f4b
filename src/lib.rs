//! keypose - keypoint skeleton annotation
//!
//! Editing of keypoint templates (joints connected by edges, normalized to
//! a region of interest), committing them as pose annotations, and the
//! bulk pose list actions: select all, visibility toggle, mirror, delete.

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod keybindings;
pub mod model;
pub mod pose;
pub mod render;
pub mod scene;
pub mod selection;
pub mod session;
pub mod template;
pub mod undo;
pub mod zoom;

pub use config::EditorConfig;
pub use error::{GraphError, StructureError};
pub use geometry::{Point, PointAxis, RegionOfInterest};
pub use model::{EdgeLine, KeypointNode, KeypointStructure, Label, TemplateState};
pub use scene::{AnnotationScene, KeypointAnnotation, PoseAnnotationStore};
pub use session::AnnotationSession;
pub use template::TemplateEditor;
