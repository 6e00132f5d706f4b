//! Stored keypoint structure: the persisted, normalized form of a template.
//!
//! JSON layout:
//! ```json
//! {
//!   "edges": [{ "nodes": ["head", "neck"] }],
//!   "positions": [{ "label": "head", "x": 0.5, "y": 0.1 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::keypoint::{EdgeLine, KeypointNode, TemplateState};
use super::label::{Label, LabelId};
use crate::error::StructureError;
use crate::geometry::{self, Point, RegionOfInterest};

/// An edge of a stored structure, as a pair of label ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointEdge {
    pub nodes: [LabelId; 2],
}

impl KeypointEdge {
    pub fn new(from: impl Into<LabelId>, to: impl Into<LabelId>) -> Self {
        Self {
            nodes: [from.into(), to.into()],
        }
    }
}

/// A normalized (0-1) joint position of a stored structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypointPosition {
    pub label: LabelId,
    pub x: f32,
    pub y: f32,
}

impl KeypointPosition {
    pub fn new(label: impl Into<LabelId>, x: f32, y: f32) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Keypoint structure as supplied by the persistence/import boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KeypointStructure {
    pub edges: Vec<KeypointEdge>,
    pub positions: Vec<KeypointPosition>,
}

impl KeypointStructure {
    /// Parse a structure from JSON.
    pub fn from_json(json: &str) -> Result<Self, StructureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the structure to JSON.
    pub fn to_json(&self) -> Result<String, StructureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the position stored for a label.
    pub fn position(&self, label_id: &str) -> Option<&KeypointPosition> {
        self.positions.iter().find(|p| p.label == label_id)
    }

    /// Import gate: a structure needs edges and positions, each label has at
    /// most one position, and every edge must join two different labels that
    /// have a position.
    pub fn validate(&self) -> Result<(), StructureError> {
        if self.edges.is_empty() {
            return Err(StructureError::EmptyEdges);
        }
        if self.positions.is_empty() {
            return Err(StructureError::EmptyPositions);
        }
        self.check_unique_labels()?;

        for KeypointEdge { nodes: [from, to] } in &self.edges {
            if from == to {
                return Err(StructureError::SelfLoop {
                    label_id: from.clone(),
                });
            }
            for id in [from, to] {
                if self.position(id).is_none() {
                    return Err(StructureError::dangling(id.clone()));
                }
            }
        }

        Ok(())
    }

    /// Build an editable template, denormalized against `roi`.
    ///
    /// Label ids are resolved against `labels` to copy names and colors into
    /// the nodes. Each edge gets a freshly generated id. Dangling references
    /// are rejected instead of producing orphan edges.
    pub fn build_template(
        &self,
        labels: &[Label],
        roi: &RegionOfInterest,
    ) -> Result<TemplateState, StructureError> {
        self.check_unique_labels()?;

        let points = self
            .positions
            .iter()
            .map(|position| {
                let label = labels
                    .iter()
                    .find(|l| l.id == position.label)
                    .ok_or_else(|| StructureError::UnknownLabel {
                        label_id: position.label.clone(),
                    })?;
                let normalized = KeypointNode::new(label.clone(), position.point());
                Ok(geometry::denormalize_point(&normalized, roi))
            })
            .collect::<Result<Vec<_>, StructureError>>()?;

        let edges = self
            .edges
            .iter()
            .map(|KeypointEdge { nodes: [from, to] }| {
                if from == to {
                    return Err(StructureError::SelfLoop {
                        label_id: from.clone(),
                    });
                }
                for id in [from, to] {
                    if self.position(id).is_none() {
                        return Err(StructureError::dangling(id.clone()));
                    }
                }
                Ok(EdgeLine::new(from.clone(), to.clone()))
            })
            .collect::<Result<Vec<_>, StructureError>>()?;

        log::debug!(
            "Built template with {} keypoints and {} edges",
            points.len(),
            edges.len()
        );

        Ok(TemplateState::new(points, edges))
    }

    fn check_unique_labels(&self) -> Result<(), StructureError> {
        let mut seen = HashSet::new();
        match self.positions.iter().find(|p| !seen.insert(p.label.as_str())) {
            Some(repeated) => Err(StructureError::DuplicateLabel {
                label_id: repeated.label.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<Label> {
        ["head", "neck", "tail"]
            .iter()
            .enumerate()
            .map(|(i, id)| Label::with_default_color(*id, *id, i))
            .collect()
    }

    fn structure() -> KeypointStructure {
        KeypointStructure {
            edges: vec![KeypointEdge::new("head", "neck"), KeypointEdge::new("neck", "tail")],
            positions: vec![
                KeypointPosition::new("head", 0.5, 0.0),
                KeypointPosition::new("neck", 0.5, 0.5),
                KeypointPosition::new("tail", 0.5, 1.0),
            ],
        }
    }

    #[test]
    fn test_parse_stored_json() {
        let json = r#"{
            "edges": [{ "nodes": ["head", "neck"] }],
            "positions": [
                { "label": "head", "x": 0.5, "y": 0.1 },
                { "label": "neck", "x": 0.5, "y": 0.3 }
            ]
        }"#;

        let parsed = KeypointStructure::from_json(json).unwrap();
        assert_eq!(parsed.edges, vec![KeypointEdge::new("head", "neck")]);
        assert_eq!(parsed.positions.len(), 2);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let s = structure();
        let back = KeypointStructure::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_validate_rejects_empty() {
        let mut s = structure();
        s.edges.clear();
        assert!(matches!(s.validate(), Err(StructureError::EmptyEdges)));

        let mut s = structure();
        s.positions.clear();
        assert!(matches!(s.validate(), Err(StructureError::EmptyPositions)));
    }

    #[test]
    fn test_validate_rejects_dangling_and_self_loop() {
        let mut s = structure();
        s.edges.push(KeypointEdge::new("tail", "paw"));
        assert!(matches!(
            s.validate(),
            Err(StructureError::DanglingReference { label_id }) if label_id == "paw"
        ));

        let mut s = structure();
        s.edges.push(KeypointEdge::new("head", "head"));
        assert!(matches!(s.validate(), Err(StructureError::SelfLoop { .. })));
    }

    #[test]
    fn test_repeated_label_rejected() {
        let mut s = structure();
        s.positions.insert(1, KeypointPosition::new("head", 0.5, 0.5));

        assert!(matches!(
            s.validate(),
            Err(StructureError::DuplicateLabel { label_id }) if label_id == "head"
        ));
        assert!(matches!(
            s.build_template(&labels(), &RegionOfInterest::from_size(100.0, 100.0)),
            Err(StructureError::DuplicateLabel { .. })
        ));
    }

    #[test]
    fn test_build_template_denormalizes() {
        let roi = RegionOfInterest::new(0.0, 0.0, 200.0, 100.0);
        let template = structure().build_template(&labels(), &roi).unwrap();

        assert_eq!(template.points.len(), 3);
        assert_eq!(template.edges.len(), 2);
        assert!(template.is_consistent());

        let neck = template.node("neck").unwrap();
        assert_eq!((neck.x, neck.y), (100.0, 50.0));
        assert_eq!(neck.label.name, "neck");
        assert!(neck.is_visible);

        assert_eq!(template.edges[0].from, "head");
        assert_eq!(template.edges[0].to, "neck");
    }

    #[test]
    fn test_build_template_rejects_dangling() {
        let mut s = structure();
        s.edges.push(KeypointEdge::new("neck", "paw"));
        let roi = RegionOfInterest::from_size(100.0, 100.0);

        assert!(matches!(
            s.build_template(&labels(), &roi),
            Err(StructureError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_build_template_rejects_unknown_label() {
        let roi = RegionOfInterest::from_size(100.0, 100.0);
        let only_head = vec![Label::new("head", "head", [0; 4])];

        assert!(matches!(
            structure().build_template(&only_head, &roi),
            Err(StructureError::UnknownLabel { label_id }) if label_id == "neck"
        ));
    }

    #[test]
    fn test_structure_roundtrips_through_template() {
        let roi = RegionOfInterest::new(10.0, 20.0, 400.0, 300.0);
        let s = structure();
        let back = s.build_template(&labels(), &roi).unwrap().to_structure(&roi);

        assert_eq!(back.edges, s.edges);
        for (a, b) in back.positions.iter().zip(&s.positions) {
            assert_eq!(a.label, b.label);
            assert!((a.x - b.x).abs() < 1e-5);
            assert!((a.y - b.y).abs() < 1e-5);
        }
    }
}
