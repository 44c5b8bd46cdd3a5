//! Display labels and color tokens for answers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::Choice;

/// Language for answer labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// German.
    De,
}

impl Locale {
    /// The lowercase language code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a supported locale.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported locale '{0}': expected en or de")]
pub struct UnsupportedLocaleError(String);

impl FromStr for Locale {
    type Err = UnsupportedLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(UnsupportedLocaleError(s.to_string())),
        }
    }
}

/// Semantic color of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// `like`.
    Positive,
    /// `try`.
    Tentative,
    /// `dislike`.
    Negative,
    /// No answer recorded.
    Muted,
}

impl Tone {
    /// The color as a `#rrggbb` string.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Positive => "#22c55e",
            Self::Tentative => "#f59e0b",
            Self::Negative => "#ef4444",
            Self::Muted => "#99a1b3",
        }
    }
}

/// How an answer is shown: a label and a tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Human-readable label.
    pub label: &'static str,
    /// Semantic color.
    pub tone: Tone,
}

/// Maps an answer, or its absence, to a label and tone.
///
/// An unanswered item gets its own label and the muted tone, so it is never
/// mistaken for an explicit `dislike`.
#[must_use]
pub const fn project(choice: Option<Choice>, locale: Locale) -> Projection {
    Projection {
        label: label_for(choice, locale),
        tone: tone_for(choice),
    }
}

/// The label for an answer.
#[must_use]
pub const fn label_for(choice: Option<Choice>, locale: Locale) -> &'static str {
    match (locale, choice) {
        (Locale::En, Some(Choice::Like)) => "Like",
        (Locale::En, Some(Choice::Try)) => "Try",
        (Locale::En, Some(Choice::Dislike)) => "Dislike",
        (Locale::En, None) => "Not answered",
        (Locale::De, Some(Choice::Like)) => "Mag ich",
        (Locale::De, Some(Choice::Try)) => "Ausprobieren",
        (Locale::De, Some(Choice::Dislike)) => "Mag ich nicht",
        (Locale::De, None) => "Nicht beantwortet",
    }
}

/// The tone for an answer.
#[must_use]
pub const fn tone_for(choice: Option<Choice>) -> Tone {
    match choice {
        Some(Choice::Like) => Tone::Positive,
        Some(Choice::Try) => Tone::Tentative,
        Some(Choice::Dislike) => Tone::Negative,
        None => Tone::Muted,
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Some(Choice::Like), Locale::De, "Mag ich", Tone::Positive)]
    #[test_case(Some(Choice::Try), Locale::De, "Ausprobieren", Tone::Tentative)]
    #[test_case(Some(Choice::Dislike), Locale::De, "Mag ich nicht", Tone::Negative)]
    #[test_case(Some(Choice::Try), Locale::En, "Try", Tone::Tentative)]
    #[test_case(None, Locale::En, "Not answered", Tone::Muted)]
    fn projects(choice: Option<Choice>, locale: Locale, label: &str, tone: Tone) {
        let projection = project(choice, locale);
        assert_eq!(projection.label, label);
        assert_eq!(projection.tone, tone);
    }

    #[test]
    fn unanswered_is_distinct_from_dislike() {
        for locale in [Locale::En, Locale::De] {
            assert_ne!(
                project(None, locale),
                project(Some(Choice::Dislike), locale)
            );
        }
    }

    #[test]
    fn locale_parses() {
        assert_eq!("DE".parse::<Locale>().unwrap(), Locale::De);
        assert!("fr".parse::<Locale>().is_err());
    }
}
