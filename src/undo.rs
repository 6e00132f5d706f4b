//! Undo/Redo history for template editing.
//!
//! History is a linear list of full snapshots. Every edit pushes the state it
//! replaces; undo swaps the current state with the newest snapshot and moves
//! the current one onto the redo side. A new edit after an undo discards the
//! redo branch.

use crate::constants::DEFAULT_MAX_UNDO_HISTORY;

/// Configuration for the undo stack
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of snapshots to keep in history
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_UNDO_HISTORY,
        }
    }
}

/// A snapshot together with the edit that replaced it.
#[derive(Debug, Clone)]
struct Entry<T> {
    state: T,
    description: String,
}

/// The undo/redo history stack.
///
/// Maintains two stacks:
/// - `undo_stack`: Snapshots that can be restored by undo (most recent at the end)
/// - `redo_stack`: Snapshots that can be restored by redo (most recent at the end)
#[derive(Debug, Clone)]
pub struct UndoStack<T: Clone> {
    /// Stack of snapshots that can be undone
    undo_stack: Vec<Entry<T>>,
    /// Stack of snapshots that can be redone
    redo_stack: Vec<Entry<T>>,
    /// Configuration
    config: UndoConfig,
}

impl<T: Clone> Default for UndoStack<T> {
    fn default() -> Self {
        Self::with_config(UndoConfig::default())
    }
}

impl<T: Clone> UndoStack<T> {
    /// Create a new empty undo stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Record the state an edit is about to replace.
    /// This clears the redo stack (can't redo after a new action).
    pub fn push(&mut self, previous: T, description: impl Into<String>) {
        let description = description.into();
        log::debug!("📝 Undo: pushed '{}'", description);
        self.undo_stack.push(Entry {
            state: previous,
            description,
        });
        self.redo_stack.clear();

        // Limit history size
        while self.undo_stack.len() > self.config.max_history {
            self.undo_stack.remove(0);
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Undo: returns the previous state, or None if nothing to undo.
    ///
    /// The current state is moved to the redo stack.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let entry = self.undo_stack.pop()?;
        log::debug!("⏪ Undo: '{}'", entry.description);
        self.redo_stack.push(Entry {
            state: current,
            description: entry.description.clone(),
        });
        Some(entry.state)
    }

    /// Redo: returns the next state, or None if nothing to redo.
    ///
    /// The current state is moved back to the undo stack.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let entry = self.redo_stack.pop()?;
        log::debug!("⏩ Redo: '{}'", entry.description);
        self.undo_stack.push(Entry {
            state: current,
            description: entry.description.clone(),
        });
        Some(entry.state)
    }

    /// Get the description of the edit that would be undone
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|e| e.description.as_str())
    }

    /// Get the description of the edit that would be redone
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|e| e.description.as_str())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        log::debug!("🗑️ Undo history cleared");
    }

    /// Get the number of snapshots in undo history
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of snapshots in redo history
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_stack_basic() {
        let mut stack: UndoStack<u32> = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());

        stack.push(1, "set 2");
        assert!(stack.can_undo());
        assert!(!stack.can_redo());

        assert_eq!(stack.undo(2), Some(1));
        assert!(!stack.can_undo());
        assert!(stack.can_redo());

        assert_eq!(stack.redo(1), Some(2));
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_undo_redo_clamped_at_ends() {
        let mut stack: UndoStack<u32> = UndoStack::new();
        assert_eq!(stack.undo(0), None);
        assert_eq!(stack.redo(0), None);
        assert_eq!(stack.undo_count(), 0);
        assert_eq!(stack.redo_count(), 0);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut stack: UndoStack<u32> = UndoStack::new();

        stack.push(0, "first");
        stack.undo(1);
        assert!(stack.can_redo());

        // Push new snapshot should clear redo
        stack.push(0, "second");
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_max_history() {
        let mut stack: UndoStack<u32> = UndoStack::with_config(UndoConfig { max_history: 3 });

        for i in 0..5 {
            stack.push(i, format!("step {}", i));
        }

        assert_eq!(stack.undo_count(), 3);
        // Oldest snapshots are dropped first
        assert_eq!(stack.undo(5), Some(4));
        assert_eq!(stack.undo(4), Some(3));
        assert_eq!(stack.undo(3), Some(2));
        assert_eq!(stack.undo(2), None);
    }

    #[test]
    fn test_descriptions_follow_history() {
        let mut stack: UndoStack<u32> = UndoStack::new();
        stack.push(0, "Add point 'head'");
        assert_eq!(stack.undo_description(), Some("Add point 'head'"));
        assert_eq!(stack.redo_description(), None);

        stack.undo(1);
        assert_eq!(stack.undo_description(), None);
        assert_eq!(stack.redo_description(), Some("Add point 'head'"));
    }

    #[test]
    fn test_clear() {
        let mut stack: UndoStack<u32> = UndoStack::new();
        stack.push(0, "a");
        stack.push(1, "b");
        stack.undo(2);
        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }
}
