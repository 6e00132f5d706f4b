//! Render model for keypoints and edges.
//!
//! Computes what the rendering surface needs to draw a pose: positions,
//! zoom-independent sizes, colors and highlight state. Sizes are in graph
//! units, i.e. already divided by the zoom so they stay constant on screen.

use crate::color::{self, Rgba};
use crate::constants::{
    ACTIVE_STROKE_MULTIPLIER, KEYPOINT_CONTRAST_COLOR, KEYPOINT_STROKE_RATIO, LABEL_TEXT_LIGHT,
    OCCLUDED_ICON_SIZE,
};
use crate::geometry::Point;
use crate::model::{EdgeId, KeypointNode, LabelId, TemplateState};
use crate::session::AnnotationSession;

/// How to draw one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub label_id: LabelId,
    pub center: Point,
    /// Circle radius, or half the marker size for occluded joints
    pub radius: f32,
    pub stroke_width: f32,
    pub fill: Rgba,
    pub stroke: Rgba,
    /// Label text color, readable on the label color
    pub text_color: Rgba,
    /// Hovered or selected
    pub is_active: bool,
    /// Occluded joints are drawn as a cross marker
    pub is_visible: bool,
}

/// How to draw one edge: two overlaid half-lines colored by endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeVisual {
    pub id: EdgeId,
    pub from: Point,
    pub to: Point,
    pub from_color: Rgba,
    /// Only selected edges show the second endpoint's color
    pub to_color: Option<Rgba>,
    pub is_selected: bool,
    pub is_hovered: bool,
}

/// Visuals for a list of joints.
pub fn node_visuals(points: &[KeypointNode], session: &AnnotationSession, radius: f32) -> Vec<NodeVisual> {
    let zoom = session.zoom.state().zoom;

    points
        .iter()
        .map(|point| {
            let is_active = session.is_highlighted(&point.label.id);
            let (fill, stroke) = if is_active {
                (KEYPOINT_CONTRAST_COLOR, point.label.color)
            } else {
                (point.label.color, KEYPOINT_CONTRAST_COLOR)
            };
            let multiplier = if is_active { ACTIVE_STROKE_MULTIPLIER } else { 1.0 };
            let radius = if point.is_visible {
                radius / zoom
            } else {
                OCCLUDED_ICON_SIZE / zoom / 2.0
            };

            NodeVisual {
                label_id: point.label.id.clone(),
                center: Point::new(point.x, point.y),
                radius,
                stroke_width: radius * KEYPOINT_STROKE_RATIO * multiplier,
                fill,
                stroke,
                text_color: color::foreground_color(
                    point.label.color,
                    KEYPOINT_CONTRAST_COLOR,
                    LABEL_TEXT_LIGHT,
                ),
                is_active,
                is_visible: point.is_visible,
            }
        })
        .collect()
}

/// Visuals for every edge of a template. Edges whose endpoints cannot be
/// resolved are skipped.
pub fn edge_visuals(template: &TemplateState, session: &AnnotationSession) -> Vec<EdgeVisual> {
    template
        .edges
        .iter()
        .filter_map(|edge| {
            let (from, to) = template.endpoints(edge)?;
            let is_selected = session.selected.is_active(&edge.id);

            Some(EdgeVisual {
                id: edge.id.clone(),
                from: Point::new(from.x, from.y),
                to: Point::new(to.x, to.y),
                from_color: from.label.color,
                to_color: is_selected.then_some(to.label.color),
                is_selected,
                is_hovered: session.hovered.is_active(&edge.id),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::KEYPOINT_RADIUS;
    use crate::geometry::RegionOfInterest;
    use crate::model::{EdgeLine, Label};

    const RED: Rgba = [255, 0, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    fn template() -> TemplateState {
        TemplateState::new(
            vec![
                KeypointNode::new(Label::new("a", "a", RED), Point::new(0.0, 0.0)),
                KeypointNode::new(Label::new("b", "b", BLUE), Point::new(10.0, 0.0)),
            ],
            vec![EdgeLine::new("a", "b")],
        )
    }

    fn zoomed_session(zoom: f32) -> AnnotationSession {
        let mut session = AnnotationSession::new();
        session.zoom.set_screen_size(100.0 * zoom, 100.0 * zoom);
        session.zoom.set_target(Some(RegionOfInterest::from_size(100.0, 100.0)));
        session
    }

    #[test]
    fn test_inactive_node_colors() {
        let session = AnnotationSession::new();
        let visuals = node_visuals(&template().points, &session, KEYPOINT_RADIUS);

        assert_eq!(visuals[0].fill, RED);
        assert_eq!(visuals[0].stroke, KEYPOINT_CONTRAST_COLOR);
        assert!(!visuals[0].is_active);
        assert_eq!(visuals[0].radius, KEYPOINT_RADIUS);
    }

    #[test]
    fn test_selected_node_swaps_colors() {
        let mut session = AnnotationSession::new();
        session.selected.toggle("a");
        let visuals = node_visuals(&template().points, &session, KEYPOINT_RADIUS);

        assert!(visuals[0].is_active);
        assert_eq!(visuals[0].fill, KEYPOINT_CONTRAST_COLOR);
        assert_eq!(visuals[0].stroke, RED);
        assert_eq!(visuals[0].stroke_width, visuals[1].stroke_width * 2.0);
    }

    #[test]
    fn test_label_text_contrast() {
        let mut points = template().points;
        points[0].label.color = [0xf0, 0xf0, 0xf0, 0xff];

        let visuals = node_visuals(&points, &AnnotationSession::new(), KEYPOINT_RADIUS);
        assert_eq!(visuals[0].text_color, KEYPOINT_CONTRAST_COLOR);
        assert_eq!(visuals[1].text_color, LABEL_TEXT_LIGHT);
    }

    #[test]
    fn test_sizes_shrink_with_zoom() {
        let session = zoomed_session(2.0);
        let mut points = template().points;
        points[1].is_visible = false;

        let visuals = node_visuals(&points, &session, KEYPOINT_RADIUS);
        assert_eq!(visuals[0].radius, KEYPOINT_RADIUS / 2.0);
        assert_eq!(visuals[1].radius, OCCLUDED_ICON_SIZE / 4.0);
        assert!(!visuals[1].is_visible);
    }

    #[test]
    fn test_edge_colors() {
        let state = template();
        let mut session = AnnotationSession::new();

        let visuals = edge_visuals(&state, &session);
        assert_eq!(visuals[0].from_color, RED);
        assert_eq!(visuals[0].to_color, None);
        assert_eq!(visuals[0].to, Point::new(10.0, 0.0));

        session.reset_and_select([state.edges[0].id.clone()]);
        let visuals = edge_visuals(&state, &session);
        assert!(visuals[0].is_selected);
        assert_eq!(visuals[0].to_color, Some(BLUE));
    }

    #[test]
    fn test_dangling_edge_skipped() {
        let mut state = template();
        state.edges.push(EdgeLine::new("a", "missing"));

        assert_eq!(edge_visuals(&state, &AnnotationSession::new()).len(), 1);
    }
}
