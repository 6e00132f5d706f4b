//! Annotation scene: the committed pose annotations of one media item.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::geometry::PointAxis;
use crate::model::{KeypointNode, TemplateState};

/// Unique identifier for an annotation.
pub type AnnotationId = u64;

/// Shape discriminator of committed annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Pose,
}

/// Committed pose shape: joint positions and visibility, no edge topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseShape {
    pub shape_type: ShapeType,
    pub points: Vec<KeypointNode>,
}

impl PoseShape {
    pub fn new(points: Vec<KeypointNode>) -> Self {
        Self {
            shape_type: ShapeType::Pose,
            points,
        }
    }
}

/// A keypoint annotation attached to a media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeypointAnnotation {
    pub id: AnnotationId,
    pub shape: PoseShape,
    #[serde(skip)]
    pub is_selected: bool,
}

impl KeypointAnnotation {
    pub fn new(id: AnnotationId, points: Vec<KeypointNode>) -> Self {
        Self {
            id,
            shape: PoseShape::new(points),
            is_selected: false,
        }
    }

    /// Commit the joints of a template; edges stay with the label schema.
    pub fn from_template(id: AnnotationId, template: &TemplateState) -> Self {
        Self::new(id, template.points.clone())
    }

    /// Get a joint by label id.
    pub fn point(&self, label_id: &str) -> Option<&KeypointNode> {
        self.shape.points.iter().find(|p| p.label.id == label_id)
    }

    /// Copy with the points replaced.
    pub fn with_points(&self, points: Vec<KeypointNode>) -> Self {
        Self {
            id: self.id,
            shape: PoseShape::new(points),
            is_selected: self.is_selected,
        }
    }
}

/// The generic annotation operations pose actions delegate to.
pub trait AnnotationScene {
    /// All annotations in the scene.
    fn annotations(&self) -> Vec<&KeypointAnnotation>;

    /// Remove annotations by id.
    fn remove_annotations(&mut self, ids: &[AnnotationId]);

    /// Replace annotations with the same ids; unknown ids are added.
    fn replace_annotations(&mut self, annotations: Vec<KeypointAnnotation>);
}

/// Storage for the pose annotations of a single media item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseAnnotationStore {
    /// All annotations, keyed by their ID.
    annotations: HashMap<AnnotationId, KeypointAnnotation>,
    /// Counter for generating unique annotation IDs.
    next_id: AnnotationId,
    /// Dirty flag - set when annotations change.
    /// Used to avoid redrawing the overlay every frame.
    #[serde(skip)]
    dirty: bool,
}

impl PoseAnnotationStore {
    pub fn new() -> Self {
        Self {
            annotations: HashMap::new(),
            next_id: 1,
            dirty: true, // Start dirty so first overlay build happens
        }
    }

    /// Check if the store has been modified since last clear_dirty().
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after rebuilding the overlay.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Commit a template as a new annotation and return its ID.
    pub fn commit(&mut self, template: &TemplateState) -> AnnotationId {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        self.annotations
            .insert(id, KeypointAnnotation::from_template(id, template));
        self.dirty = true;
        log::info!(
            "Committed pose annotation {} with {} keypoints",
            id,
            template.points.len()
        );
        id
    }

    /// Get an annotation by ID.
    pub fn get(&self, id: AnnotationId) -> Option<&KeypointAnnotation> {
        self.annotations.get(&id)
    }

    /// Get the number of annotations.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Mirror a committed annotation in place; it becomes selected.
    pub fn mirror(&mut self, id: AnnotationId, axis: PointAxis) -> bool {
        let Some(annotation) = self.annotations.get(&id) else {
            return false;
        };
        let mirrored = crate::pose::mirror_annotation(annotation, axis);
        self.replace_annotations(vec![mirrored]);
        true
    }
}

impl AnnotationScene for PoseAnnotationStore {
    fn annotations(&self) -> Vec<&KeypointAnnotation> {
        let mut all: Vec<_> = self.annotations.values().collect();
        all.sort_by_key(|a| a.id);
        all
    }

    fn remove_annotations(&mut self, ids: &[AnnotationId]) {
        for id in ids {
            if self.annotations.remove(id).is_some() {
                log::debug!("Removed pose annotation {}", id);
                self.dirty = true;
            }
        }
    }

    fn replace_annotations(&mut self, annotations: Vec<KeypointAnnotation>) {
        for annotation in annotations {
            self.next_id = self.next_id.max(annotation.id.saturating_add(1));
            self.annotations.insert(annotation.id, annotation);
            self.dirty = true;
        }
    }
}
