//! Tracks which item a partner is answering and whether they are done.

use serde::Serialize;

use crate::domain::{Answers, Catalog, Choice, Item, ItemId};

/// Where a partner is in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "index")]
pub enum WalkerState {
    /// The item at this index in the flattened catalog is the next one to
    /// answer.
    Answering(usize),
    /// Every item has an answer.
    Complete,
}

/// Index of the first item without an answer.
///
/// Returns `items.len()` when every item is answered.
#[must_use]
pub fn first_unanswered(items: &[Item], answers: &Answers) -> usize {
    items
        .iter()
        .position(|item| !answers.contains(item.id()))
        .unwrap_or(items.len())
}

/// Error returned when recording a choice for an id the catalog does not
/// contain.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("item '{0}' is not in the catalog")]
pub struct InvalidItem(pub ItemId);

/// One partner's answers together with their position in the catalog.
///
/// The walker does not own the catalog; every operation takes the catalog
/// it was created for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walker {
    answers: Answers,
    cursor: usize,
}

impl Walker {
    /// Creates a walker with no answers.
    ///
    /// It starts at the first item, or complete for an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from existing answers.
    #[must_use]
    pub fn with_answers(catalog: &Catalog, answers: Answers) -> Self {
        let cursor = first_unanswered(catalog.items(), &answers);
        Self { answers, cursor }
    }

    /// The current state for `catalog`.
    #[must_use]
    pub fn state(&self, catalog: &Catalog) -> WalkerState {
        if self.cursor < catalog.len() {
            WalkerState::Answering(self.cursor)
        } else {
            WalkerState::Complete
        }
    }

    /// The item to answer next, or `None` when complete.
    #[must_use]
    pub fn current<'c>(&self, catalog: &'c Catalog) -> Option<&'c Item> {
        catalog.items().get(self.cursor)
    }

    /// Whether every item in `catalog` has an answer.
    #[must_use]
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.state(catalog) == WalkerState::Complete
    }

    /// Records a choice and moves to the first unanswered item.
    ///
    /// Re-answering an item replaces the earlier choice. A complete walker
    /// stays complete.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidItem`] if `id` is not in `catalog`. Nothing is
    /// recorded in that case and the current item is unchanged.
    pub fn record(
        &mut self,
        catalog: &Catalog,
        id: &ItemId,
        choice: Choice,
    ) -> Result<WalkerState, InvalidItem> {
        if !catalog.contains(id) {
            return Err(InvalidItem(id.clone()));
        }

        if let Some(previous) = self.answers.record(id.clone(), choice) {
            tracing::debug!(%id, %previous, %choice, "replaced answer");
        }
        self.cursor = first_unanswered(catalog.items(), &self.answers);

        Ok(self.state(catalog))
    }

    /// The answers recorded so far.
    #[must_use]
    pub const fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Number of catalog items answered, and the catalog size.
    #[must_use]
    pub fn progress(&self, catalog: &Catalog) -> (usize, usize) {
        let answered = catalog
            .items()
            .iter()
            .filter(|item| self.answers.contains(item.id()))
            .count();
        (answered, catalog.len())
    }

    /// One-based position of the current item, capped at the catalog size.
    #[must_use]
    pub fn position(&self, catalog: &Catalog) -> usize {
        (self.cursor + 1).min(catalog.len())
    }

    /// Drops every answer and returns to the first item.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.cursor = 0;
    }
}
