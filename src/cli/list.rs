use clap::Parser;
use tracing::instrument;
use yesnomaybe::{Catalog, domain::Tier};

use super::{
    Workspace,
    terminal::{Colorize, is_narrow},
};

#[derive(Debug, Parser, Default)]
#[command(about = "List the catalog's categories and items")]
pub struct List {
    /// Only show items up to this tier (easy, medium, advanced)
    #[arg(long, value_name = "TIER")]
    max_tier: Option<Tier>,

    /// Output format (table, json, ids)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    /// One item id per line
    Ids,
}

impl List {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let catalog = workspace.load_catalog()?;

        if catalog.is_empty() {
            println!("The catalog has no items.");
            return Ok(());
        }

        match self.output {
            OutputFormat::Table => self.output_table(&catalog),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&self.to_json(&catalog))?);
            }
            OutputFormat::Ids => {
                for item in catalog.items().iter().filter(|item| self.shows(item.tier())) {
                    println!("{}", item.id());
                }
            }
        }
        Ok(())
    }

    /// Items without a tier are always shown.
    fn shows(&self, tier: Option<Tier>) -> bool {
        match (self.max_tier, tier) {
            (Some(max), Some(tier)) => tier <= max,
            _ => true,
        }
    }

    fn to_json(&self, catalog: &Catalog) -> serde_json::Value {
        use serde_json::json;

        let categories: Vec<_> = catalog
            .categories()
            .map(|category| {
                let items: Vec<_> = category
                    .items
                    .iter()
                    .filter(|item| self.shows(item.tier()))
                    .collect();
                json!({
                    "id": category.id,
                    "label": category.label,
                    "items": items,
                })
            })
            .collect();

        json!({
            "total": catalog.len(),
            "categories": categories,
        })
    }

    fn output_table(&self, catalog: &Catalog) {
        let narrow = is_narrow();
        let mut shown = 0;

        for category in catalog.categories() {
            println!("{}", category.label);
            println!("{}", "─".repeat(category.label.chars().count()).dim());

            for item in category.items.iter().filter(|item| self.shows(item.tier())) {
                shown += 1;
                let tier = item
                    .tier()
                    .map_or_else(String::new, |tier| format!("[{tier}]").dim());
                if narrow {
                    println!("• {} {tier}", item.label());
                } else {
                    println!("  {:<24} {:<40} {tier}", item.id().dim(), item.label());
                }
            }
            println!();
        }

        println!(
            "{}",
            format!(
                "{shown} of {} items in {} categories",
                catalog.len(),
                catalog.categories().len()
            )
            .dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;
    use yesnomaybe::{Category, Item, ItemId, domain::CategoryId};

    use super::*;

    fn catalog() -> Catalog {
        let item = |id: &str| Item::new(ItemId::new(id).unwrap(), id.to_uppercase());
        Catalog::new(vec![
            Category::new(
                CategoryId::new("c").unwrap(),
                "C",
                vec![
                    item("x1").with_tier(Tier::Easy),
                    item("x2").with_tier(Tier::Advanced),
                ],
            ),
            Category::new(
                CategoryId::new("d").unwrap(),
                "D",
                vec![item("x3")],
            ),
        ])
        .unwrap()
    }

    #[test_case(None, Some(Tier::Advanced), true; "no filter")]
    #[test_case(Some(Tier::Medium), Some(Tier::Easy), true; "below max")]
    #[test_case(Some(Tier::Medium), Some(Tier::Medium), true; "at max")]
    #[test_case(Some(Tier::Medium), Some(Tier::Advanced), false; "above max")]
    #[test_case(Some(Tier::Easy), None, true; "untiered")]
    fn tier_filter(max_tier: Option<Tier>, tier: Option<Tier>, shown: bool) {
        let list = List {
            max_tier,
            ..List::default()
        };
        assert_eq!(list.shows(tier), shown);
    }

    #[test]
    fn json_groups_items_by_category() {
        let output = List::default().to_json(&catalog());

        assert_eq!(output["total"], 3);
        assert_eq!(output["categories"][0]["id"], "c");
        assert_eq!(output["categories"][0]["label"], "C");
        assert_eq!(
            output["categories"][0]["items"][1],
            json!({ "id": "x2", "label": "X2", "tier": "advanced" })
        );
        assert_eq!(
            output["categories"][1]["items"],
            json!([{ "id": "x3", "label": "X3" }])
        );
    }

    #[test]
    fn json_applies_the_tier_filter() {
        let list = List {
            max_tier: Some(Tier::Medium),
            ..List::default()
        };
        let output = list.to_json(&catalog());

        let ids: Vec<_> = output["categories"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|category| category["items"].as_array().unwrap())
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["x1", "x3"]);
        assert_eq!(output["total"], 3);
    }

    #[test]
    fn runs_against_builtin_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = Workspace::new(tmp.path().to_path_buf(), None, None);
        for output in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Ids] {
            List {
                max_tier: None,
                output,
            }
            .run(&workspace)
            .unwrap();
        }
    }
}
