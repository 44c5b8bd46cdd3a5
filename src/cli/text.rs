//! Screen text in the configured language.
//!
//! Answer labels live with the projection in the library; this is the
//! surrounding chrome of the interactive flow and the match table.

use yesnomaybe::domain::Locale;

#[derive(Debug, Clone, Copy)]
pub struct Text(pub Locale);

impl Text {
    pub const fn name_required(self) -> &'static str {
        match self.0 {
            Locale::En => "a name is required",
            Locale::De => "bitte einen Namen eingeben",
        }
    }

    pub fn hand_over(self, to: &str) -> String {
        match self.0 {
            Locale::En => format!("All answered. Hand over to {to}."),
            Locale::De => format!("Alles beantwortet. Gib weiter an {to}."),
        }
    }

    pub fn ready(self, name: &str) -> String {
        match self.0 {
            Locale::En => format!("{name}, ready?"),
            Locale::De => format!("{name}, bereit?"),
        }
    }

    pub const fn start_over(self) -> &'static str {
        match self.0 {
            Locale::En => "Start over?",
            Locale::De => "Neu starten?",
        }
    }

    pub const fn photo(self) -> &'static str {
        match self.0 {
            Locale::En => "Photo",
            Locale::De => "Foto",
        }
    }

    pub const fn matches_title(self) -> &'static str {
        match self.0 {
            Locale::En => "Your matches",
            Locale::De => "Eure Matches",
        }
    }

    pub const fn no_matches(self) -> &'static str {
        match self.0 {
            Locale::En => "No shared likes found.",
            Locale::De => "Keine Überschneidungen gefunden.",
        }
    }

    pub fn matched(self, matched: usize, total: usize) -> String {
        match self.0 {
            Locale::En => format!("{matched} of {total} items matched"),
            Locale::De => format!("{matched} von {total} Einträgen gemeinsam"),
        }
    }
}
