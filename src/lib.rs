//! Two-partner questionnaire
//!
//! Each partner privately answers the same catalog of items with like, try
//! or dislike. Only items both partners answered positively are revealed.

pub mod domain;
pub use domain::{
    Answers, Catalog, Category, Choice, Config, Item, ItemId, Partner, Session, Walker,
    compute_matches,
};

/// Loading catalogs from files.
pub mod storage;
pub use storage::{LoadError, builtin_catalog, load_catalog};
