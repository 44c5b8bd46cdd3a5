use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// An answer a partner gives to a single item.
///
/// Not having answered an item yet is not a `Choice`; it is represented by
/// the absence of an entry in [`Answers`](crate::Answers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// The partner likes this.
    Like,
    /// The partner would like to try this.
    Try,
    /// The partner does not want this.
    Dislike,
}

impl Choice {
    /// All choices, in the order they are offered.
    pub const ALL: [Self; 3] = [Self::Like, Self::Try, Self::Dislike];

    /// Whether this choice counts towards a match.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Like | Self::Try)
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Try => "try",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`Choice`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid choice '{0}': expected one of like, try, dislike")]
pub struct InvalidChoiceError(String);

impl FromStr for Choice {
    type Err = InvalidChoiceError;

    /// Parses a choice case-insensitively.
    ///
    /// The yes/maybe/no spellings are accepted as aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "like" | "yes" | "y" => Ok(Self::Like),
            "try" | "maybe" | "m" => Ok(Self::Try),
            "dislike" | "no" | "n" => Ok(Self::Dislike),
            _ => Err(InvalidChoiceError(s.to_string())),
        }
    }
}
