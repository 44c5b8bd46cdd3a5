use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Catalog, Choice, ItemId};

/// One partner's answers, keyed by item id.
///
/// An item without an entry is unanswered. Recording an answer for an item
/// that already has one replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers(HashMap<ItemId, Choice>);

impl Answers {
    /// Creates an empty set of answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded choice for an item, if any.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<Choice> {
        self.0.get(id).copied()
    }

    /// Records a choice, returning the one it replaced.
    pub fn record(&mut self, id: ItemId, choice: Choice) -> Option<Choice> {
        self.0.insert(id, choice)
    }

    /// Whether the item has been answered.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.0.contains_key(id)
    }

    /// The number of recorded answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every answer.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterates over the recorded answers in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, Choice)> {
        self.0.iter().map(|(id, choice)| (id, *choice))
    }

    /// Ids that have an answer but are not part of `catalog`.
    ///
    /// Such entries are ignored when matching.
    pub fn unknown_ids<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a ItemId> {
        self.0.keys().filter(|id| !catalog.contains(id))
    }
}

impl FromIterator<(ItemId, Choice)> for Answers {
    /// Collects answers; later entries for the same id win.
    fn from_iter<T: IntoIterator<Item = (ItemId, Choice)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(ItemId, Choice)> for Answers {
    fn extend<T: IntoIterator<Item = (ItemId, Choice)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
