use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// Error returned when a string is not a valid identifier.
///
/// Identifiers must be non-empty and must not contain whitespace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid identifier '{0}': must be non-empty and contain no whitespace")]
pub struct InvalidIdError(String);

fn validate(s: String) -> Result<NonEmptyString, InvalidIdError> {
    if s.chars().any(char::is_whitespace) {
        return Err(InvalidIdError(s));
    }
    NonEmptyString::new(s).map_err(InvalidIdError)
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(NonEmptyString);

        impl $name {
            /// Creates a new identifier from a string.
            ///
            /// # Errors
            ///
            /// Returns [`InvalidIdError`] if the string is empty or contains
            /// whitespace.
            pub fn new(s: impl Into<String>) -> Result<Self, InvalidIdError> {
                validate(s.into()).map(Self)
            }

            /// Returns the string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = InvalidIdError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.as_str().to_string()
            }
        }

        impl FromStr for $name {
            type Err = InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

identifier! {
    /// The stable unique identifier of an [`Item`](crate::Item).
    ///
    /// Item ids are unique across the whole catalog, not only within their
    /// category.
    ItemId
}

identifier! {
    /// The unique identifier of a [`Category`](crate::Category).
    CategoryId
}
