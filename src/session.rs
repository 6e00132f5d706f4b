//! Annotation session: the selection, hover and zoom state every widget of
//! one editing session reads and writes.
//!
//! The session is passed explicitly to whatever needs it. There is one
//! writer at a time (the user), so no locking is involved. Keyboard actions
//! are dispatched through [`AnnotationSession::apply`].

use crate::error::GraphError;
use crate::geometry::PointAxis;
use crate::keybindings::{KeyBindings, KeyChord, PoseAction};
use crate::model::LabelId;
use crate::selection::ActiveSet;
use crate::template::TemplateEditor;
use crate::zoom::ZoomController;

/// Shared state of one annotation editing session.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSession {
    /// Selected joint and edge ids
    pub selected: ActiveSet,
    /// Hovered joint and edge ids
    pub hovered: ActiveSet,
    /// Screen transform
    pub zoom: ZoomController,
}

impl AnnotationSession {
    pub fn new() -> Self {
        log::info!("Annotation session started");
        Self::default()
    }

    /// A joint or edge is highlighted when hovered or selected.
    pub fn is_highlighted(&self, id: &str) -> bool {
        self.hovered.is_active(id) || self.selected.is_active(id)
    }

    /// Replace the selection with exactly `ids`.
    ///
    /// Used when a context menu opens on an element.
    pub fn reset_and_select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.set_active(ids);
    }

    /// Run a keyboard action against the template being edited.
    pub fn apply(&mut self, action: PoseAction, editor: &mut TemplateEditor) -> Result<(), GraphError> {
        log::debug!("Applying {}", action.name());
        match action {
            PoseAction::SelectAll => {
                self.selected
                    .toggle_all(editor.state().points.iter().map(|p| p.label.id.as_str()));
            }
            PoseAction::DeselectAll => self.selected.clear(),
            PoseAction::DeleteSelected => self.delete_selected(editor)?,
            PoseAction::Undo => {
                editor.undo();
            }
            PoseAction::Redo => {
                editor.redo();
            }
            PoseAction::MirrorX => editor.mirror(PointAxis::X),
            PoseAction::MirrorY => editor.mirror(PointAxis::Y),
        }
        Ok(())
    }

    /// Look up a key press and run the bound action, if any.
    pub fn handle_key(
        &mut self,
        bindings: &KeyBindings,
        chord: KeyChord,
        editor: &mut TemplateEditor,
    ) -> Result<Option<PoseAction>, GraphError> {
        let Some(action) = bindings.action_for(chord) else {
            return Ok(None);
        };
        self.apply(action, editor)?;
        Ok(Some(action))
    }

    /// Delete the selected joints (with their edges) and selected edges.
    fn delete_selected(&mut self, editor: &mut TemplateEditor) -> Result<(), GraphError> {
        let points: Vec<LabelId> = editor
            .state()
            .points
            .iter()
            .map(|p| p.label.id.clone())
            .filter(|id| self.selected.is_active(id))
            .collect();
        if !points.is_empty() {
            editor.remove_points(&points)?;
        }

        // Edges touching a removed joint are already gone
        let edges: Vec<String> = editor
            .state()
            .edges
            .iter()
            .map(|e| e.id.clone())
            .filter(|id| self.selected.is_active(id))
            .collect();
        for id in &edges {
            editor.remove_edge(id)?;
        }

        self.selected.clear();
        Ok(())
    }

    /// End of session: drop selection, hover and zoom state.
    pub fn teardown(&mut self) {
        self.selected.clear();
        self.hovered.clear();
        self.zoom = ZoomController::new();
        log::info!("Annotation session ended");
    }
}
