use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, ItemId};

/// How adventurous an item is, from gentlest to most demanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Suitable for anyone.
    Easy,
    /// Needs some experience or preparation.
    Medium,
    /// For the experienced.
    Advanced,
}

impl Tier {
    /// The canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Tier`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid tier '{0}': expected one of easy, medium, advanced")]
pub struct InvalidTierError(String);

impl FromStr for Tier {
    type Err = InvalidTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "advanced" => Ok(Self::Advanced),
            _ => Err(InvalidTierError(s.to_string())),
        }
    }
}

/// A single question a partner answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tier: Option<Tier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
}

impl Item {
    /// Creates an item with no tier and no reference.
    #[must_use]
    pub fn new(id: ItemId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            tier: None,
            reference: None,
        }
    }

    /// Sets the difficulty tier.
    #[must_use]
    pub const fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Sets the illustrative reference (for example an image locator).
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// The item's identifier.
    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.id
    }

    /// The display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The difficulty tier, if any.
    #[must_use]
    pub const fn tier(&self) -> Option<Tier> {
        self.tier
    }

    /// The illustrative reference, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// An ordered, named group of items.
///
/// Item order is significant: it is the order partners answer in and the
/// order matches are reported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// The category's identifier.
    pub id: CategoryId,
    /// The display label.
    pub label: String,
    /// The items, in presentation order.
    pub items: Vec<Item>,
}

impl Category {
    /// Creates a category.
    #[must_use]
    pub fn new(id: CategoryId, label: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id,
            label: label.into(),
            items,
        }
    }
}
