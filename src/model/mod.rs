//! Data models for keypoint templates.

mod keypoint;
mod label;
mod structure;

pub use keypoint::{EdgeId, EdgeLine, KeypointNode, TemplateState};
pub use label::{Label, LabelId};
pub use structure::{KeypointEdge, KeypointPosition, KeypointStructure};
