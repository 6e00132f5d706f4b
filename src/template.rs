//! Template editing state machine.
//!
//! [`TemplateEditor`] owns the authoritative [`TemplateState`] of an editing
//! session. Every public edit validates its preconditions first and returns a
//! [`GraphError`] without touching state or history when they fail; a
//! successful edit pushes the replaced snapshot onto the undo stack.

use crate::config::UserPreferences;
use crate::error::{GraphError, StructureError};
use crate::geometry::{
    self, Point, PointAxis, Positioned, RegionOfInterest, project_point_onto_segment,
};
use crate::model::{EdgeId, EdgeLine, KeypointNode, KeypointStructure, Label, LabelId, TemplateState};
use crate::undo::{UndoConfig, UndoStack};

/// Editing session for one pose template.
#[derive(Debug, Clone)]
pub struct TemplateEditor {
    /// Bounds that moved points are clamped to
    roi: RegionOfInterest,
    /// Frame the points were last laid out in, used by `resize`
    frame: RegionOfInterest,
    state: TemplateState,
    history: UndoStack<TemplateState>,
    /// Snapshot taken when a drag gesture started
    drag_origin: Option<TemplateState>,
}

impl TemplateEditor {
    /// Create an editor with an empty template.
    pub fn new(roi: RegionOfInterest) -> Self {
        Self::with_state(roi, TemplateState::default(), UndoConfig::default())
    }

    /// Create an editor starting at `state`, laid out inside `roi`.
    pub fn with_state(roi: RegionOfInterest, state: TemplateState, config: UndoConfig) -> Self {
        Self {
            roi,
            frame: roi,
            state,
            history: UndoStack::with_config(config),
            drag_origin: None,
        }
    }

    /// Load a stored structure, denormalized against `roi`.
    pub fn from_structure(
        structure: &KeypointStructure,
        labels: &[Label],
        roi: RegionOfInterest,
        config: UndoConfig,
    ) -> Result<Self, StructureError> {
        structure.validate()?;
        let state = structure.build_template(labels, &roi)?;
        log::info!(
            "Loaded template: {} keypoints, {} edges",
            state.points.len(),
            state.edges.len()
        );
        Ok(Self::with_state(roi, state, config))
    }

    /// Readonly preview of a normalized template inside a container.
    ///
    /// The template is laid out in the container, then shrunk about its
    /// center by `scale_factor` so joints do not touch the borders.
    pub fn readonly_preview(normalized: &TemplateState, container: RegionOfInterest, scale_factor: f32) -> Self {
        let mut editor = Self::new(container);
        editor.reset(normalized.denormalized(&container));
        editor.layout(container, scale_factor);
        editor
    }

    /// Readonly preview using the configured scale factor.
    pub fn readonly_preview_with(
        normalized: &TemplateState,
        container: RegionOfInterest,
        preferences: &UserPreferences,
    ) -> Self {
        Self::readonly_preview(normalized, container, preferences.readonly_scale_factor)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The current template.
    pub fn state(&self) -> &TemplateState {
        &self.state
    }

    /// The region points are clamped to.
    pub fn roi(&self) -> &RegionOfInterest {
        &self.roi
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.drag_origin.is_some()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Description of the edit undo would revert.
    pub fn undo_description(&self) -> Option<&str> {
        self.history.undo_description()
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Stored, normalized form of the current template.
    ///
    /// Points are normalized against the frame they were laid out in, so a
    /// scaled layout exports the same structure it was built from.
    pub fn to_structure(&self) -> KeypointStructure {
        self.state.to_structure(&self.frame)
    }

    // ------------------------------------------------------------------------
    // Node operations
    // ------------------------------------------------------------------------

    /// Append a visible joint for `label` at `point`.
    pub fn add_point(&mut self, point: Point, label: Label) -> Result<(), GraphError> {
        self.end_drag();
        if self.state.contains(&label.id) {
            return Err(rejected(GraphError::duplicate_label(label.id)));
        }

        let description = format!("Add point '{}'", label.name);
        let mut next = self.state.clone();
        next.points.push(KeypointNode::new(label, point));
        self.commit(description, next);
        Ok(())
    }

    /// Move a joint, clamped to the region of interest.
    pub fn move_point(&mut self, label_id: &str, position: Point) -> Result<(), GraphError> {
        self.end_drag();
        let next = self.moved(label_id, position)?;
        self.commit(format!("Move point '{}'", label_id), next);
        Ok(())
    }

    /// Move a joint as part of a drag gesture without recording history.
    ///
    /// The whole gesture becomes a single undo step once [`Self::end_drag`]
    /// is called or another edit starts.
    pub fn drag_point(&mut self, label_id: &str, position: Point) -> Result<(), GraphError> {
        let next = self.moved(label_id, position)?;
        if self.drag_origin.is_none() {
            self.drag_origin = Some(self.state.clone());
        }
        self.state = next;
        Ok(())
    }

    /// Finish a drag gesture, recording it as one history step.
    pub fn end_drag(&mut self) {
        let Some(origin) = self.drag_origin.take() else {
            return;
        };
        if origin != self.state {
            self.history.push(origin, "Drag point");
        }
    }

    /// Remove joints and every edge touching them.
    pub fn remove_points(&mut self, label_ids: &[LabelId]) -> Result<(), GraphError> {
        self.end_drag();
        if label_ids.is_empty() {
            return Ok(());
        }
        if let Some(missing) = label_ids.iter().find(|id| !self.state.contains(id)) {
            return Err(rejected(GraphError::missing_node(missing.clone())));
        }

        let removed = |id: &str| label_ids.iter().any(|r| r == id);
        let next = TemplateState::new(
            self.state
                .points
                .iter()
                .filter(|p| !removed(&p.label.id))
                .cloned()
                .collect(),
            self.state
                .edges
                .iter()
                .filter(|e| !removed(&e.from) && !removed(&e.to))
                .cloned()
                .collect(),
        );

        self.commit(format!("Delete {} points", label_ids.len()), next);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Edge operations
    // ------------------------------------------------------------------------

    /// Connect two joints, returning the new edge id.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<EdgeId, GraphError> {
        self.end_drag();
        self.check_new_edge(from, to)?;

        let edge = EdgeLine::new(from, to);
        let id = edge.id.clone();
        let mut next = self.state.clone();
        next.edges.push(edge);
        self.commit(format!("Connect '{}' and '{}'", from, to), next);
        Ok(id)
    }

    /// Remove an edge by id.
    pub fn remove_edge(&mut self, edge_id: &str) -> Result<(), GraphError> {
        self.end_drag();
        if self.state.edge(edge_id).is_none() {
            return Err(rejected(GraphError::UnknownEdge(edge_id.to_string())));
        }

        let mut next = self.state.clone();
        next.edges.retain(|e| e.id != edge_id);
        self.commit("Delete edge", next);
        Ok(())
    }

    /// Remove the edge connecting two joints, in either direction.
    pub fn remove_edge_between(&mut self, a: &str, b: &str) -> Result<(), GraphError> {
        let id = self
            .state
            .edge_between(a, b)
            .map(|e| e.id.clone())
            .ok_or_else(|| {
                rejected(GraphError::EdgeNotFound {
                    from: a.to_string(),
                    to: b.to_string(),
                })
            })?;
        self.remove_edge(&id)
    }

    /// Split the edge between `prev_from` and `prev_to` with a new joint.
    ///
    /// The old edge is replaced by `prev_from -> new` and `new -> prev_to`.
    pub fn insert_intermediate_point(
        &mut self,
        new_point: Point,
        prev_from: &str,
        prev_to: &str,
        new_label: Label,
    ) -> Result<(), GraphError> {
        self.end_drag();
        for id in [prev_from, prev_to] {
            if !self.state.contains(id) {
                return Err(rejected(GraphError::missing_node(id)));
            }
        }
        if self.state.contains(&new_label.id) {
            return Err(rejected(GraphError::duplicate_label(new_label.id)));
        }
        let Some(split) = self.state.edge_between(prev_from, prev_to).map(|e| e.id.clone()) else {
            return Err(rejected(GraphError::EdgeNotFound {
                from: prev_from.to_string(),
                to: prev_to.to_string(),
            }));
        };

        let description = format!("Insert point '{}'", new_label.name);
        let new_id = new_label.id.clone();
        let mut next = self.state.clone();
        next.edges.retain(|e| e.id != split);
        next.points.push(KeypointNode::new(new_label, new_point));
        next.edges.push(EdgeLine::new(prev_from, new_id.clone()));
        next.edges.push(EdgeLine::new(new_id, prev_to));

        self.commit(description, next);
        Ok(())
    }

    /// Insert a joint where a click lands on an edge.
    ///
    /// The click is projected onto the edge; clicks whose projection falls
    /// outside the segment are rejected.
    pub fn insert_point_on_edge(&mut self, edge_id: &str, click: Point, new_label: Label) -> Result<Point, GraphError> {
        let edge = self
            .state
            .edge(edge_id)
            .ok_or_else(|| rejected(GraphError::UnknownEdge(edge_id.to_string())))?;
        let (from, to) = self
            .state
            .endpoints(edge)
            .ok_or_else(|| rejected(GraphError::missing_node(edge.from.clone())))?;

        let projected = project_point_onto_segment((from.position(), to.position()), &click)
            .ok_or_else(|| rejected(GraphError::ProjectionOutsideEdge))?;

        let (from, to) = (edge.from.clone(), edge.to.clone());
        self.insert_intermediate_point(projected, &from, &to, new_label)?;
        Ok(projected)
    }

    // ------------------------------------------------------------------------
    // Whole-template operations
    // ------------------------------------------------------------------------

    /// Mirror all joints across `axis`; edges are unaffected.
    pub fn mirror(&mut self, axis: PointAxis) {
        self.end_drag();
        if self.state.points.is_empty() {
            return;
        }

        let next = TemplateState::new(
            geometry::mirror_points_across_axis(&self.state.points, axis),
            self.state.edges.clone(),
        );
        self.commit(format!("Mirror {} axis", axis.name()), next);
    }

    /// Re-layout the template into `new_roi`, shrunk about its center by
    /// `scale_factor`.
    pub fn resize(&mut self, new_roi: RegionOfInterest, scale_factor: f32) {
        self.end_drag();
        let previous = self.state.clone();
        self.layout(new_roi, scale_factor);
        if previous != self.state {
            self.history.push(previous, "Resize template");
        }
    }

    /// Revert the last edit. No-op when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.end_drag();
        match self.history.undo(self.state.clone()) {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone edit. No-op when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.end_drag();
        match self.history.redo(self.state.clone()) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }

    /// Discard all history and start fresh at `state`.
    pub fn reset(&mut self, state: TemplateState) {
        self.drag_origin = None;
        self.history.clear();
        self.state = state;
        log::debug!("Template reset with {} keypoints", self.state.points.len());
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn commit(&mut self, description: impl Into<String>, next: TemplateState) {
        let previous = std::mem::replace(&mut self.state, next);
        self.history.push(previous, description);
    }

    fn moved(&self, label_id: &str, position: Point) -> Result<TemplateState, GraphError> {
        if !self.state.contains(label_id) {
            return Err(rejected(GraphError::missing_node(label_id)));
        }

        let clamped = geometry::clamp_point_to_roi(&position, &self.roi);
        let mut next = self.state.clone();
        for node in next.points.iter_mut().filter(|p| p.label.id == label_id) {
            node.set_position(clamped);
        }
        Ok(next)
    }

    fn check_new_edge(&self, from: &str, to: &str) -> Result<(), GraphError> {
        if from == to {
            return Err(rejected(GraphError::SelfLoop {
                label_id: from.to_string(),
            }));
        }
        for id in [from, to] {
            if !self.state.contains(id) {
                return Err(rejected(GraphError::missing_node(id)));
            }
        }
        if self.state.edge_between(from, to).is_some() {
            return Err(rejected(GraphError::DuplicateEdge {
                from: from.to_string(),
                to: to.to_string(),
            }));
        }
        Ok(())
    }

    /// Move points from the current frame into `roi` scaled by `scale_factor`.
    fn layout(&mut self, roi: RegionOfInterest, scale_factor: f32) {
        let target = roi.scaled(scale_factor);
        if self.frame.is_valid() {
            self.state = self.state.normalized(&self.frame).denormalized(&target);
        }
        self.roi = roi;
        self.frame = target;
    }
}

fn rejected(error: GraphError) -> GraphError {
    log::warn!("Rejected template edit: {}", error);
    error
}
