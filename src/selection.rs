//! Selection and hover sets shared by every widget of an annotation session.

use std::collections::HashSet;

/// A set of active ids (label ids for joints, edge ids for edges).
///
/// Renderers query this for every node on every frame, so lookups are
/// hash based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveSet {
    ids: HashSet<String>,
}

impl ActiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an id is in the set.
    pub fn is_active(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Replace the whole set.
    pub fn set_active<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    /// Flip membership of one id.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the active ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Check if every id in `all` is active.
    pub fn contains_all<'a>(&self, all: impl IntoIterator<Item = &'a str>) -> bool {
        all.into_iter().all(|id| self.is_active(id))
    }

    /// Tri-state "select all".
    ///
    /// Selects every id of `all` when none or only some are active, and
    /// clears the set when all of them already are.
    pub fn toggle_all<'a>(&mut self, all: impl IntoIterator<Item = &'a str>) {
        let all: Vec<&str> = all.into_iter().collect();
        if !all.is_empty() && all.iter().all(|id| self.is_active(id)) {
            self.clear();
        } else {
            self.set_active(all);
        }
    }
}
