//! Keypoint graph model: joints, edges and the template aggregate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::label::{Label, LabelId};
use super::structure::{KeypointEdge, KeypointPosition, KeypointStructure};
use crate::geometry::{self, Point, Positioned, RegionOfInterest};

/// Identifier of an edge, generated on creation.
pub type EdgeId = String;

/// One labeled joint of a pose skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointNode {
    /// The label this joint represents
    pub label: Label,
    /// X coordinate in the current coordinate space
    pub x: f32,
    /// Y coordinate in the current coordinate space
    pub y: f32,
    /// False when the joint is marked occluded
    pub is_visible: bool,
}

impl KeypointNode {
    /// Create a visible node for `label` at `point`.
    pub fn new(label: Label, point: Point) -> Self {
        Self {
            label,
            x: point.x,
            y: point.y,
            is_visible: true,
        }
    }

    /// Get the label id of this node.
    pub fn label_id(&self) -> &str {
        &self.label.id
    }
}

impl Positioned for KeypointNode {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, point: Point) {
        self.x = point.x;
        self.y = point.y;
    }
}

/// A connection between two joints.
///
/// Endpoints are referenced by label id, which is unique per template.
/// Meaning is undirected; `from`/`to` only fix which label color is drawn
/// on which half of the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLine {
    pub id: EdgeId,
    pub from: LabelId,
    pub to: LabelId,
}

impl EdgeLine {
    /// Create an edge with a freshly generated id.
    pub fn new(from: impl Into<LabelId>, to: impl Into<LabelId>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Check if this edge connects `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Check if `label_id` is one of the endpoints.
    pub fn touches(&self, label_id: &str) -> bool {
        self.from == label_id || self.to == label_id
    }
}

/// One pose skeleton under construction; the unit of undo history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateState {
    pub points: Vec<KeypointNode>,
    pub edges: Vec<EdgeLine>,
}

impl TemplateState {
    pub fn new(points: Vec<KeypointNode>, edges: Vec<EdgeLine>) -> Self {
        Self { points, edges }
    }

    /// Get the node for a label.
    pub fn node(&self, label_id: &str) -> Option<&KeypointNode> {
        self.points.iter().find(|p| p.label.id == label_id)
    }

    /// Check if the template has a node for a label.
    pub fn contains(&self, label_id: &str) -> bool {
        self.node(label_id).is_some()
    }

    /// Get an edge by id.
    pub fn edge(&self, edge_id: &str) -> Option<&EdgeLine> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    /// Get the edge connecting two labels, in either direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<&EdgeLine> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    /// Resolve both endpoint nodes of an edge.
    pub fn endpoints(&self, edge: &EdgeLine) -> Option<(&KeypointNode, &KeypointNode)> {
        Some((self.node(&edge.from)?, self.node(&edge.to)?))
    }

    /// All label ids in node order.
    pub fn label_ids(&self) -> Vec<LabelId> {
        self.points.iter().map(|p| p.label.id.clone()).collect()
    }

    /// Check the structural invariants: unique labels, no self loops and
    /// no edge pointing at a missing node.
    pub fn is_consistent(&self) -> bool {
        let unique_labels = self
            .points
            .iter()
            .enumerate()
            .all(|(i, p)| self.points[..i].iter().all(|q| q.label.id != p.label.id));

        unique_labels
            && self
                .edges
                .iter()
                .all(|e| e.from != e.to && self.contains(&e.from) && self.contains(&e.to))
    }

    /// Map all points from normalized space into `roi`.
    pub fn denormalized(&self, roi: &RegionOfInterest) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| geometry::denormalize_point(p, roi))
                .collect(),
            edges: self.edges.clone(),
        }
    }

    /// Map all points from `roi` into normalized space.
    pub fn normalized(&self, roi: &RegionOfInterest) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| geometry::normalize_point(p, roi))
                .collect(),
            edges: self.edges.clone(),
        }
    }

    /// Convert a template edited inside `roi` into its stored form.
    pub fn to_structure(&self, roi: &RegionOfInterest) -> KeypointStructure {
        let normalized = self.normalized(roi);

        KeypointStructure {
            edges: normalized
                .edges
                .iter()
                .map(|e| KeypointEdge::new(e.from.clone(), e.to.clone()))
                .collect(),
            positions: normalized
                .points
                .iter()
                .map(|p| KeypointPosition::new(p.label.id.clone(), p.x, p.y))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, x: f32, y: f32) -> KeypointNode {
        KeypointNode::new(Label::new(id, id, [0, 0, 0, 255]), Point::new(x, y))
    }

    #[test]
    fn test_new_node_is_visible() {
        let n = node("a", 1.0, 2.0);
        assert!(n.is_visible);
        assert_eq!(n.position(), Point::new(1.0, 2.0));
        assert_eq!(n.label_id(), "a");
    }

    #[test]
    fn test_edge_ids_are_unique() {
        let a = EdgeLine::new("a", "b");
        let b = EdgeLine::new("a", "b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_edge_connects_either_direction() {
        let e = EdgeLine::new("a", "b");
        assert!(e.connects("a", "b"));
        assert!(e.connects("b", "a"));
        assert!(!e.connects("a", "c"));
        assert!(e.touches("b"));
        assert!(!e.touches("c"));
    }

    #[test]
    fn test_consistency_checks() {
        let mut state = TemplateState::new(
            vec![node("a", 0.0, 0.0), node("b", 1.0, 1.0)],
            vec![EdgeLine::new("a", "b")],
        );
        assert!(state.is_consistent());

        state.edges.push(EdgeLine::new("a", "missing"));
        assert!(!state.is_consistent());

        state.edges.pop();
        state.points.push(node("a", 5.0, 5.0));
        assert!(!state.is_consistent());
    }

    #[test]
    fn test_endpoints_resolve_nodes() {
        let state = TemplateState::new(
            vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)],
            vec![EdgeLine::new("a", "b")],
        );
        let (from, to) = state.endpoints(&state.edges[0]).unwrap();
        assert_eq!(from.label_id(), "a");
        assert_eq!(to.label_id(), "b");
    }

    #[test]
    fn test_to_structure_normalizes() {
        let roi = RegionOfInterest::new(100.0, 0.0, 200.0, 100.0);
        let state = TemplateState::new(
            vec![node("a", 100.0, 0.0), node("b", 300.0, 50.0)],
            vec![EdgeLine::new("a", "b")],
        );

        let structure = state.to_structure(&roi);

        assert_eq!(structure.edges, vec![KeypointEdge::new("a", "b")]);
        assert_eq!(structure.positions[0], KeypointPosition::new("a", 0.0, 0.0));
        assert_eq!(structure.positions[1], KeypointPosition::new("b", 1.0, 0.5));
    }

    #[test]
    fn test_node_serializes_camel_case() {
        let json = serde_json::to_value(node("a", 1.0, 2.0)).unwrap();
        assert_eq!(json["isVisible"], true);
        assert_eq!(json["label"]["id"], "a");
    }
}
