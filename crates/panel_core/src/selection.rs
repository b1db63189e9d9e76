use std::{collections::HashSet, fmt, hash::Hash};

use shared::{domain::Identified, error::PanelError};
use tracing::debug;

/// Holds at most one selected id out of the currently known batch.
#[derive(Debug, Clone)]
pub struct SelectionTracker<I> {
    known: HashSet<I>,
    selected: Option<I>,
}

impl<I> Default for SelectionTracker<I> {
    fn default() -> Self {
        Self {
            known: HashSet::new(),
            selected: None,
        }
    }
}

impl<I> SelectionTracker<I>
where
    I: Clone + Eq + Hash + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_items<T>(items: &[T]) -> Self
    where
        T: Identified<Id = I>,
    {
        let mut tracker = Self::new();
        tracker.replace_candidates(items.iter().map(|item| item.id().clone()));
        tracker
    }

    /// Starts with `initial` selected when it names one of `items`.
    pub fn with_selection<T>(items: &[T], initial: Option<I>) -> Self
    where
        T: Identified<Id = I>,
    {
        let mut tracker = Self::for_items(items);
        tracker.selected = initial.filter(|id| tracker.known.contains(id));
        tracker
    }

    /// Swaps in a new batch. A selection missing from it is dropped.
    pub fn replace_candidates(&mut self, ids: impl IntoIterator<Item = I>) {
        self.known = ids.into_iter().collect();
        if let Some(selected) = &self.selected {
            if !self.known.contains(selected) {
                debug!(id = %selected, "dropping selection absent from new batch");
                self.selected = None;
            }
        }
    }

    pub fn select(&mut self, id: &I) -> Result<(), PanelError> {
        if !self.known.contains(id) {
            return Err(PanelError::unknown_candidate(id));
        }
        if self.selected.as_ref() != Some(id) {
            debug!(id = %id, "selection changed");
            self.selected = Some(id.clone());
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn current(&self) -> Option<&I> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &I) -> bool {
        self.selected.as_ref() == Some(id)
    }

    pub fn contains(&self, id: &I) -> bool {
        self.known.contains(id)
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
