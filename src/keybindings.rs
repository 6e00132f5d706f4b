//! Customizable keybindings for the pose editor.
//!
//! This module defines the key chords that trigger pose list and template
//! actions. Bindings are persisted as part of the editor configuration.

use serde::{Deserialize, Serialize};

/// Keys that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    D,
    X,
    Y,
    Z,
    Delete,
    Backspace,
    Escape,
}

/// A key together with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: KeyCode,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyChord {
    /// A bare key without modifiers.
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub const fn shift(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: true,
        }
    }

    /// Display string, e.g. "Ctrl+Z".
    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.ctrl {
            label.push_str("Ctrl+");
        }
        if self.shift {
            label.push_str("Shift+");
        }
        label.push_str(key_to_string(self.key));
        label
    }
}

/// Actions reachable through a keyboard shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseAction {
    SelectAll,
    DeselectAll,
    DeleteSelected,
    Undo,
    Redo,
    MirrorX,
    MirrorY,
}

impl PoseAction {
    pub fn name(&self) -> &'static str {
        match self {
            PoseAction::SelectAll => "Select all",
            PoseAction::DeselectAll => "Deselect all",
            PoseAction::DeleteSelected => "Delete selected",
            PoseAction::Undo => "Undo",
            PoseAction::Redo => "Redo",
            PoseAction::MirrorX => "Mirror X",
            PoseAction::MirrorY => "Mirror Y",
        }
    }

    pub fn all() -> &'static [PoseAction] {
        &[
            PoseAction::SelectAll,
            PoseAction::DeselectAll,
            PoseAction::DeleteSelected,
            PoseAction::Undo,
            PoseAction::Redo,
            PoseAction::MirrorX,
            PoseAction::MirrorY,
        ]
    }
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub select_all: KeyChord,
    pub deselect_all: KeyChord,
    pub delete_selected: KeyChord,
    pub undo: KeyChord,
    pub redo: KeyChord,
    pub mirror_x: KeyChord,
    pub mirror_y: KeyChord,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            select_all: KeyChord::ctrl(KeyCode::A),
            deselect_all: KeyChord::ctrl(KeyCode::D),
            delete_selected: KeyChord::key(KeyCode::Delete),
            undo: KeyChord::ctrl(KeyCode::Z),
            redo: KeyChord::ctrl(KeyCode::Y),
            mirror_x: KeyChord::shift(KeyCode::X),
            mirror_y: KeyChord::shift(KeyCode::Y),
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action that corresponds to a key press, if any.
    pub fn action_for(&self, chord: KeyChord) -> Option<PoseAction> {
        PoseAction::all()
            .iter()
            .copied()
            .find(|action| self.chord_for(*action) == chord)
    }

    /// Get the chord bound to an action.
    pub fn chord_for(&self, action: PoseAction) -> KeyChord {
        match action {
            PoseAction::SelectAll => self.select_all,
            PoseAction::DeselectAll => self.deselect_all,
            PoseAction::DeleteSelected => self.delete_selected,
            PoseAction::Undo => self.undo,
            PoseAction::Redo => self.redo,
            PoseAction::MirrorX => self.mirror_x,
            PoseAction::MirrorY => self.mirror_y,
        }
    }

    /// Rebind an action.
    pub fn set_chord(&mut self, action: PoseAction, chord: KeyChord) {
        let slot = match action {
            PoseAction::SelectAll => &mut self.select_all,
            PoseAction::DeselectAll => &mut self.deselect_all,
            PoseAction::DeleteSelected => &mut self.delete_selected,
            PoseAction::Undo => &mut self.undo,
            PoseAction::Redo => &mut self.redo,
            PoseAction::MirrorX => &mut self.mirror_x,
            PoseAction::MirrorY => &mut self.mirror_y,
        };
        *slot = chord;
    }

    /// Check if a chord is already used by another binding.
    /// Returns the name of the action using it, if any.
    pub fn key_conflict(&self, chord: KeyChord, exclude: Option<PoseAction>) -> Option<&'static str> {
        PoseAction::all()
            .iter()
            .filter(|action| Some(**action) != exclude)
            .find(|action| self.chord_for(**action) == chord)
            .map(|action| action.name())
    }
}

/// Convert a KeyCode to a display string.
pub fn key_to_string(key: KeyCode) -> &'static str {
    match key {
        KeyCode::A => "A",
        KeyCode::D => "D",
        KeyCode::X => "X",
        KeyCode::Y => "Y",
        KeyCode::Z => "Z",
        KeyCode::Delete => "Delete",
        KeyCode::Backspace => "Backspace",
        KeyCode::Escape => "Esc",
    }
}
