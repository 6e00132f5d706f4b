//! Pose annotation actions.
//!
//! Bridges editable templates and committed [`KeypointAnnotation`]s, and
//! implements the bulk actions of the pose list: select all, visibility
//! toggle, mirror and delete.

use crate::geometry::{self, PointAxis, RegionOfInterest};
use crate::model::{KeypointNode, TemplateState};
use crate::scene::{AnnotationScene, KeypointAnnotation};
use crate::selection::ActiveSet;

pub const OCCLUDE_TOOLTIP: &str = "Mark all as occluded";
pub const VISIBLE_TOOLTIP: &str = "Mark all as visible";
pub const DESELECT_TOOLTIP: &str = "Deselect all points";
pub const SELECT_TOOLTIP: &str = "Select all points";

/// Check if every selected joint of the annotation is visible.
///
/// Vacuously true when nothing is selected.
pub fn is_everything_visible(annotation: &KeypointAnnotation, selection: &ActiveSet) -> bool {
    annotation
        .shape
        .points
        .iter()
        .filter(|p| selection.is_active(&p.label.id))
        .all(|p| p.is_visible)
}

/// Bulk visibility toggle of the selected joints.
///
/// If all selected joints are visible they all become occluded; otherwise
/// they all become visible. Unselected joints are untouched.
pub fn toggle_visibility_of_selected(annotation: &KeypointAnnotation, selection: &ActiveSet) -> KeypointAnnotation {
    let visible = !is_everything_visible(annotation, selection);
    let points = annotation
        .shape
        .points
        .iter()
        .map(|p| {
            if selection.is_active(&p.label.id) {
                KeypointNode {
                    is_visible: visible,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();

    annotation.with_points(points)
}

/// Mirror a committed annotation's joints across `axis`.
///
/// The result is marked selected so the user sees what moved.
pub fn mirror_annotation(annotation: &KeypointAnnotation, axis: PointAxis) -> KeypointAnnotation {
    let mut mirrored = annotation.with_points(geometry::mirror_points_across_axis(&annotation.shape.points, axis));
    mirrored.is_selected = true;
    mirrored
}

/// Select (`true`) or deselect (`false`) every joint of the annotation.
pub fn select_all_keypoints(selection: &mut ActiveSet, annotation: &KeypointAnnotation, select: bool) {
    if select {
        selection.set_active(annotation.shape.points.iter().map(|p| p.label.id.clone()));
    } else {
        selection.clear();
    }
}

/// Tri-state "select all" of the pose list checkbox.
///
/// Selects every joint of the annotation unless all of them already are,
/// in which case the selection is cleared.
pub fn toggle_select_all(selection: &mut ActiveSet, annotation: &KeypointAnnotation) {
    selection.toggle_all(annotation.shape.points.iter().map(|p| p.label.id.as_str()));
}

/// Remove the annotation from the scene.
pub fn delete_annotation(scene: &mut impl AnnotationScene, annotation: &KeypointAnnotation) {
    scene.remove_annotations(&[annotation.id]);
}

/// Project a normalized template into a drawn box.
///
/// Joints are laid out in `bounding_box`, then clamped to the image so no
/// joint lands outside the media.
pub fn place_template(
    normalized: &TemplateState,
    bounding_box: &RegionOfInterest,
    image_roi: &RegionOfInterest,
) -> Vec<KeypointNode> {
    normalized
        .points
        .iter()
        .map(|p| geometry::clamp_point_to_roi(&geometry::denormalize_point(p, bounding_box), image_roi))
        .collect()
}

/// State of the pose list header: the select-all checkbox and the
/// visibility toggle button.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseListSummary {
    pub selected_count: usize,
    pub total_count: usize,
    pub is_everything_visible: bool,
}

impl PoseListSummary {
    pub fn new(annotation: &KeypointAnnotation, selection: &ActiveSet) -> Self {
        Self {
            selected_count: annotation
                .shape
                .points
                .iter()
                .filter(|p| selection.is_active(&p.label.id))
                .count(),
            total_count: annotation.shape.points.len(),
            is_everything_visible: is_everything_visible(annotation, selection),
        }
    }

    pub fn has_selected_points(&self) -> bool {
        self.selected_count > 0
    }

    /// Checked state of the select-all checkbox.
    pub fn is_all_selected(&self) -> bool {
        self.total_count > 0 && self.selected_count == self.total_count
    }

    /// Some but not all joints are selected.
    pub fn is_indeterminate(&self) -> bool {
        self.has_selected_points() && !self.is_all_selected()
    }

    /// The visibility toggle is only enabled with a selection.
    pub fn is_visibility_toggle_enabled(&self) -> bool {
        self.has_selected_points()
    }

    /// Tooltip of the select-all checkbox, describing what a click does.
    pub fn selection_tooltip(&self) -> &'static str {
        if self.is_all_selected() {
            DESELECT_TOOLTIP
        } else {
            SELECT_TOOLTIP
        }
    }

    pub fn visibility_tooltip(&self) -> &'static str {
        if self.is_everything_visible {
            OCCLUDE_TOOLTIP
        } else {
            VISIBLE_TOOLTIP
        }
    }

    /// Accessible label of the select-all checkbox.
    pub fn selection_label(&self) -> String {
        format!(
            "{} out of {} points selected",
            self.selected_count, self.total_count
        )
    }
}
