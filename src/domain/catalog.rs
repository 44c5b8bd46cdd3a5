//! The immutable, indexed set of items a session is played over.
//!
//! The [`Catalog`] stores every item once, in flattened catalog order, and
//! keeps each category as a range into that list. Lookups by [`ItemId`] go
//! through a hash index.

use std::{collections::HashMap, ops::Range};

use thiserror::Error;

use crate::domain::{Category, CategoryId, Item, ItemId};

/// Errors that can occur when building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two categories share an identifier.
    #[error("duplicate category id '{0}'")]
    DuplicateCategory(CategoryId),
    /// Two items share an identifier, possibly across categories.
    #[error("duplicate item id '{id}' (in categories '{first}' and '{second}')")]
    DuplicateItem {
        /// The repeated identifier.
        id: ItemId,
        /// The category the id first appeared in.
        first: CategoryId,
        /// The category the id appeared in again.
        second: CategoryId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CategoryEntry {
    id: CategoryId,
    label: String,
    range: Range<usize>,
}

/// An ordered list of categories with a flattened, indexed view of their
/// items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<CategoryEntry>,

    /// Every item in catalog order.
    items: Vec<Item>,

    /// Position of each item in `items`.
    positions: HashMap<ItemId, usize>,
}

/// A borrowed view of one category of a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryView<'a> {
    /// The category's identifier.
    pub id: &'a CategoryId,
    /// The display label.
    pub label: &'a str,
    /// The category's items, in order.
    pub items: &'a [Item],
    /// Index of the first item in the flattened catalog.
    pub offset: usize,
}

impl Catalog {
    /// Builds a catalog from categories in presentation order.
    ///
    /// # Errors
    ///
    /// Returns an error if two categories, or two items anywhere in the
    /// catalog, share an identifier.
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let capacity = categories.iter().map(|c| c.items.len()).sum();
        let mut items = Vec::with_capacity(capacity);
        let mut positions = HashMap::with_capacity(capacity);
        let mut entries: Vec<CategoryEntry> = Vec::with_capacity(categories.len());

        for category in categories {
            if entries.iter().any(|e| e.id == category.id) {
                return Err(CatalogError::DuplicateCategory(category.id));
            }

            let start = items.len();
            for item in category.items {
                if let Some(&existing) = positions.get(item.id()) {
                    let first = entries
                        .iter()
                        .find(|e| e.range.contains(&existing))
                        .map_or_else(|| category.id.clone(), |e| e.id.clone());
                    return Err(CatalogError::DuplicateItem {
                        id: item.id().clone(),
                        first,
                        second: category.id,
                    });
                }
                positions.insert(item.id().clone(), items.len());
                items.push(item);
            }

            entries.push(CategoryEntry {
                id: category.id,
                label: category.label,
                range: start..items.len(),
            });
        }

        tracing::debug!(
            categories = entries.len(),
            items = items.len(),
            "built catalog"
        );

        Ok(Self {
            categories: entries,
            items,
            positions,
        })
    }

    /// Every item, flattened across categories in catalog order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The number of items across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items at all.
    ///
    /// A catalog may have categories and still be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the categories in order.
    #[must_use]
    pub fn categories(&self) -> impl ExactSizeIterator<Item = CategoryView<'_>> {
        self.categories.iter().map(|entry| CategoryView {
            id: &entry.id,
            label: &entry.label,
            items: &self.items[entry.range.clone()],
            offset: entry.range.start,
        })
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.position(id).map(|index| &self.items[index])
    }

    /// The index of an item in the flattened catalog.
    #[must_use]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Whether the catalog contains an item with this id.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.positions.contains_key(id)
    }

    /// The category the item at `index` belongs to.
    #[must_use]
    pub fn category_at(&self, index: usize) -> Option<CategoryView<'_>> {
        self.categories()
            .find(|view| (view.offset..view.offset + view.items.len()).contains(&index))
    }
}
