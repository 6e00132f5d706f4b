//! Error types for template editing and structure import.

use thiserror::Error;

use crate::model::{EdgeId, LabelId};

/// An invalid graph operation, rejected before it touches the template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node for this label already exists in the template
    #[error("Label '{label_id}' already has a keypoint")]
    DuplicateLabel {
        /// The label that is already placed
        label_id: LabelId,
    },

    /// The referenced node is not part of the template
    #[error("No keypoint for label '{label_id}'")]
    MissingNode {
        /// The label without a node
        label_id: LabelId,
    },

    /// Edge endpoints must be two different nodes
    #[error("Edge cannot connect '{label_id}' to itself")]
    SelfLoop {
        /// The label on both ends
        label_id: LabelId,
    },

    /// The two nodes are already connected
    #[error("Edge between '{from}' and '{to}' already exists")]
    DuplicateEdge {
        /// First endpoint label
        from: LabelId,
        /// Second endpoint label
        to: LabelId,
    },

    /// No edge connects the two nodes
    #[error("No edge between '{from}' and '{to}'")]
    EdgeNotFound {
        /// First endpoint label
        from: LabelId,
        /// Second endpoint label
        to: LabelId,
    },

    /// No edge carries this id
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    /// A click projected outside the edge segment
    #[error("Point does not project onto the edge")]
    ProjectionOutsideEdge,
}

/// A stored keypoint structure that cannot become a template.
#[derive(Error, Debug)]
pub enum StructureError {
    /// The structure has no edges
    #[error("Invalid template structure: no edges")]
    EmptyEdges,

    /// The structure has no positions
    #[error("Invalid template structure: no positions")]
    EmptyPositions,

    /// An edge names a label that has no position
    #[error("Invalid template structure: edge references '{label_id}' without a position")]
    DanglingReference {
        /// The unresolved label
        label_id: LabelId,
    },

    /// Two positions name the same label
    #[error("Invalid template structure: label '{label_id}' has more than one position")]
    DuplicateLabel {
        /// The repeated label
        label_id: LabelId,
    },

    /// A position names a label missing from the label taxonomy
    #[error("Invalid template structure: unknown label '{label_id}'")]
    UnknownLabel {
        /// The unresolved label
        label_id: LabelId,
    },

    /// An edge connects a label to itself
    #[error("Invalid template structure: edge connects '{label_id}' to itself")]
    SelfLoop {
        /// The label on both ends
        label_id: LabelId,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Create a missing node error.
    pub fn missing_node(label_id: impl Into<LabelId>) -> Self {
        Self::MissingNode {
            label_id: label_id.into(),
        }
    }

    /// Create a duplicate label error.
    pub fn duplicate_label(label_id: impl Into<LabelId>) -> Self {
        Self::DuplicateLabel {
            label_id: label_id.into(),
        }
    }
}

impl StructureError {
    /// Create a dangling reference error.
    pub fn dangling(label_id: impl Into<LabelId>) -> Self {
        Self::DanglingReference {
            label_id: label_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_messages() {
        assert_eq!(
            GraphError::duplicate_label("head").to_string(),
            "Label 'head' already has a keypoint"
        );
        assert_eq!(
            GraphError::missing_node("tail").to_string(),
            "No keypoint for label 'tail'"
        );
    }

    #[test]
    fn test_structure_error_is_user_facing() {
        let err = StructureError::dangling("wrist");
        assert!(err.to_string().starts_with("Invalid template structure"));
    }
}
