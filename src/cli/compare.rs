use std::collections::BTreeSet;

use clap::Parser;
use serde_json::{Value, json};
use tracing::instrument;
use yesnomaybe::{
    Answers, Catalog, Choice, ItemId,
    domain::{Locale, MatchRow, matches::match_rows, project},
};

use super::{
    Workspace,
    terminal::{Colorize, is_narrow},
    text::Text,
};

/// Parse an `ID=CHOICE` pair.
fn parse_answer(s: &str) -> Result<(ItemId, Choice), String> {
    let (id, choice) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=CHOICE, got '{s}'"))?;
    let id = id.trim().parse().map_err(|e| format!("{e}"))?;
    let choice = choice.parse().map_err(|e| format!("{e}"))?;
    Ok((id, choice))
}

#[derive(Debug, Parser)]
#[command(about = "Compare two partners' answers without the interactive flow")]
pub struct Compare {
    /// Partner A's answers as ID=CHOICE (repeat or comma separate)
    #[arg(short = 'a', long = "partner-a", value_name = "ID=CHOICE", value_delimiter = ',', value_parser = parse_answer)]
    a: Vec<(ItemId, Choice)>,

    /// Partner B's answers as ID=CHOICE (repeat or comma separate)
    #[arg(short = 'b', long = "partner-b", value_name = "ID=CHOICE", value_delimiter = ',', value_parser = parse_answer)]
    b: Vec<(ItemId, Choice)>,

    /// Display name for partner A
    #[arg(long, default_value = "A")]
    name_a: String,

    /// Display name for partner B
    #[arg(long, default_value = "B")]
    name_b: String,

    /// Fail unless both partners answered every item
    #[arg(long)]
    strict: bool,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Compare {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = workspace.load_catalog()?;
        let a: Answers = self.a.into_iter().collect();
        let b: Answers = self.b.into_iter().collect();

        let ignored = unknown_ids(&catalog, &a, &b);
        for id in &ignored {
            tracing::warn!("Ignoring answer for unknown item '{id}'");
        }

        if self.strict {
            check_complete(&catalog, &self.name_a, &a)?;
            check_complete(&catalog, &self.name_b, &b)?;
        }

        let rows = match_rows(catalog.items(), &a, &b);
        let names = (self.name_a.as_str(), self.name_b.as_str());
        match self.output {
            OutputFormat::Table => print_table(&catalog, &rows, names, workspace.locale()),
            OutputFormat::Json => {
                let output = to_json(&catalog, &rows, names, workspace.locale(), &ignored);
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }
}

/// Answered ids that are not in the catalog, from either partner, sorted
/// and without repeats.
fn unknown_ids<'a>(catalog: &'a Catalog, a: &'a Answers, b: &'a Answers) -> Vec<&'a ItemId> {
    a.unknown_ids(catalog)
        .chain(b.unknown_ids(catalog))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn check_complete(catalog: &Catalog, name: &str, answers: &Answers) -> anyhow::Result<()> {
    let missing: Vec<_> = catalog
        .items()
        .iter()
        .filter(|item| !answers.contains(item.id()))
        .map(|item| item.id().as_str())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "{name} has not answered {} of {} items: {}",
            missing.len(),
            catalog.len(),
            missing.join(", ")
        );
    }
    Ok(())
}

/// Print the matches as a table, with each partner's colored label.
pub fn print_table(catalog: &Catalog, rows: &[MatchRow<'_>], names: (&str, &str), locale: Locale) {
    let text = Text(locale);
    let title = text.matches_title();
    println!("{title}");
    println!("{}", "─".repeat(title.chars().count()).dim());

    if rows.is_empty() {
        println!("{}", text.no_matches().dim());
        return;
    }

    let pill = |name: &str, choice: Choice| {
        let projection = project(Some(choice), locale);
        format!("{name}: {}", projection.label.tone(projection.tone))
    };

    let narrow = is_narrow();
    let width = rows
        .iter()
        .map(|row| row.item.label().chars().count())
        .max()
        .unwrap_or(0);
    let mut current_category = None;

    for row in rows {
        let category = catalog
            .position(row.item.id())
            .and_then(|index| catalog.category_at(index));
        if let Some(category) = category {
            if current_category != Some(category.id) {
                println!("\n{}", category.label.to_uppercase().dim());
                current_category = Some(category.id);
            }
        }

        let (a, b) = (pill(names.0, row.a), pill(names.1, row.b));
        if narrow {
            println!("{}", row.item.label());
            println!("  {a} · {b}");
        } else {
            println!("{:<width$}  {a}  {b}", row.item.label());
        }
    }

    println!();
    println!("{}", text.matched(rows.len(), catalog.len()).dim());
}

/// The matches as a JSON document.
fn to_json(
    catalog: &Catalog,
    rows: &[MatchRow<'_>],
    names: (&str, &str),
    locale: Locale,
    ignored: &[&ItemId],
) -> Value {
    let answer = |choice: Choice| {
        let projection = project(Some(choice), locale);
        json!({
            "choice": choice,
            "label": projection.label,
            "color": projection.tone.hex(),
        })
    };

    let matches: Vec<_> = rows
        .iter()
        .map(|row| {
            let category = catalog
                .position(row.item.id())
                .and_then(|index| catalog.category_at(index))
                .map(|category| category.id.as_str());
            json!({
                "id": row.item.id(),
                "label": row.item.label(),
                "category": category,
                "a": answer(row.a),
                "b": answer(row.b),
            })
        })
        .collect();

    json!({
        "partners": { "a": names.0, "b": names.1 },
        "total_items": catalog.len(),
        "matches": matches,
        "ignored": ignored,
    })
}
