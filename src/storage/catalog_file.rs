//! Catalog files on disk.
//!
//! A catalog file is either a bare list of categories or a table with a
//! `categories` list. YAML, JSON and TOML are supported; TOML only has the
//! table form.

use std::{
    ffi::OsStr,
    fmt, io,
    path::{Path, PathBuf},
};

use nonempty::NonEmpty;
use serde::Deserialize;
use tracing::instrument;

use crate::domain::{
    Catalog, CatalogError, Category, CategoryId, InvalidIdError, Item, ItemId, Tier,
};

const BUILTIN: &str = include_str!("../../data/catalog.yaml");

/// The serialization format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
    /// `.toml`.
    Toml,
}

impl Format {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(OsStr::to_str)?;
        match extension.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A problem with a single entry of a catalog file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Issue {
    /// A category or item id is not a valid identifier.
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),
    /// A category has an empty label.
    #[error("category '{0}' has an empty label")]
    EmptyCategoryLabel(String),
    /// An item has an empty label.
    #[error("item '{0}' has an empty label")]
    EmptyItemLabel(String),
}

/// Errors that can occur when loading a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read catalog {}", .path.display())]
    Io {
        /// The catalog path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// The file extension is not a known format.
    #[error(
        "unsupported catalog format for {} (expected .yaml, .yml, .json or .toml)",
        .0.display()
    )]
    UnsupportedFormat(PathBuf),
    /// The file was read but is not a valid catalog.
    #[error("invalid catalog {}", .path.display())]
    Parse {
        /// The catalog path.
        path: PathBuf,
        /// What is wrong with the contents.
        #[source]
        source: ParseError,
    },
}

impl LoadError {
    /// The invalid entries, if that is why loading failed.
    #[must_use]
    pub const fn issues(&self) -> Option<&NonEmpty<Issue>> {
        match self {
            Self::Parse {
                source: ParseError::Invalid(issues),
                ..
            } => Some(issues),
            _ => None,
        }
    }
}

/// Errors in the contents of a catalog.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The YAML could not be parsed.
    #[error("failed to parse catalog YAML")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON could not be parsed.
    #[error("failed to parse catalog JSON")]
    Json(#[from] serde_json::Error),
    /// The TOML could not be parsed.
    #[error("failed to parse catalog TOML")]
    Toml(#[from] toml::de::Error),
    /// One or more entries are invalid.
    #[error("catalog has invalid entries: {}", Summary(.0))]
    Invalid(NonEmpty<Issue>),
    /// Ids are not unique.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

struct Summary<'a>(&'a NonEmpty<Issue>);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<RawCategory>),
    Table(Table),
}

#[derive(Debug, Deserialize)]
struct Table {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    label: String,
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    label: String,
    #[serde(default)]
    tier: Option<Tier>,
    #[serde(default, alias = "photo", alias = "image")]
    reference: Option<String>,
}

/// Loads a catalog file, picking the format from its extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if any id or label
/// is invalid, or if ids are not unique.
#[instrument]
pub fn load_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content, format).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Loaded {} items in {} categories from {}",
        catalog.len(),
        catalog.categories().len(),
        path.display()
    );
    Ok(catalog)
}

/// The sample catalog compiled into the crate.
///
/// # Errors
///
/// Fails only if the bundled file is itself invalid.
pub fn builtin_catalog() -> Result<Catalog, ParseError> {
    parse_catalog(BUILTIN, Format::Yaml)
}

/// The raw text of the bundled sample catalog, in YAML.
#[must_use]
pub const fn builtin_catalog_source() -> &'static str {
    BUILTIN
}

/// Parses a catalog from text.
///
/// # Errors
///
/// Returns an error if the text cannot be parsed, if any id or label is
/// invalid, or if ids are not unique.
pub fn parse_catalog(content: &str, format: Format) -> Result<Catalog, ParseError> {
    let raw = match format {
        Format::Yaml => into_categories(serde_yaml::from_str(content)?),
        Format::Json => into_categories(serde_json::from_str(content)?),
        Format::Toml => toml::from_str::<Table>(content)?.categories,
    };
    build(raw)
}

fn into_categories(document: Document) -> Vec<RawCategory> {
    match document {
        Document::List(categories) | Document::Table(Table { categories }) => categories,
    }
}

fn build(raw: Vec<RawCategory>) -> Result<Catalog, ParseError> {
    let mut issues = Vec::new();
    let mut categories = Vec::with_capacity(raw.len());

    for raw_category in raw {
        let label = raw_category.label.trim();
        if label.is_empty() {
            issues.push(Issue::EmptyCategoryLabel(raw_category.id.clone()));
        }
        let id = CategoryId::new(raw_category.id.trim()).map_err(Issue::from);

        let mut items = Vec::with_capacity(raw_category.items.len());
        for raw_item in raw_category.items {
            match build_item(raw_item) {
                Ok(item) => items.push(item),
                Err(issue) => issues.push(issue),
            }
        }

        match id {
            Ok(id) => categories.push(Category::new(id, label, items)),
            Err(issue) => issues.push(issue),
        }
    }

    if let Some(issues) = NonEmpty::from_vec(issues) {
        tracing::debug!(count = issues.len(), "catalog has invalid entries");
        return Err(ParseError::Invalid(issues));
    }

    Ok(Catalog::new(categories)?)
}

fn build_item(raw: RawItem) -> Result<Item, Issue> {
    let label = raw.label.trim();
    if label.is_empty() {
        return Err(Issue::EmptyItemLabel(raw.id));
    }
    let mut item = Item::new(ItemId::new(raw.id.trim())?, label);
    if let Some(tier) = raw.tier {
        item = item.with_tier(tier);
    }
    if let Some(reference) = raw.reference.filter(|r| !r.trim().is_empty()) {
        item = item.with_reference(reference);
    }
    Ok(item)
}
