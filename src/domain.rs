//! Domain models for the two-partner questionnaire.
//!
//! This module contains the catalog of items, each partner's answers and
//! walker, the match engine, and the session that ties them together.

mod answers;
pub use answers::Answers;

/// Catalog of categories and items.
pub mod catalog;
pub use catalog::{Catalog, CatalogError, CategoryView};

mod choice;
pub use choice::{Choice, InvalidChoiceError};

/// Session configuration.
pub mod config;
pub use config::Config;

mod id;
pub use id::{CategoryId, InvalidIdError, ItemId};

mod item;
pub use item::{Category, InvalidTierError, Item, Tier};

/// The match engine.
pub mod matches;
pub use matches::{MatchRow, compute_matches};

/// Labels and colors for answers.
pub mod projection;
pub use projection::{Locale, Projection, Tone, project};

/// Two partners answering one catalog.
pub mod session;
pub use session::{Partner, Session, SessionError, Stage};

/// Per-partner progress through the catalog.
pub mod walker;
pub use walker::{InvalidItem, Walker, WalkerState};
