use clap::Parser;
use tracing::instrument;
use yesnomaybe::{Catalog, LoadError};

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser, Default)]
#[command(about = "Check that the catalog loads and is usable")]
pub struct Validate {
    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

/// Things that load fine but make for a poor questionnaire.
fn warnings(catalog: &Catalog) -> Vec<String> {
    let mut warnings = Vec::new();
    if catalog.is_empty() {
        warnings.push("the catalog has no items; both partners finish immediately".to_string());
    }
    for category in catalog.categories() {
        if category.items.is_empty() {
            warnings.push(format!("category '{}' has no items", category.id));
        }
    }
    warnings
}

impl Validate {
    #[instrument(level = "debug", skip(self, workspace))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let source = workspace.catalog_path().map_or_else(
            || "built-in catalog".to_string(),
            |path| path.display().to_string(),
        );

        let catalog = match workspace.load_catalog() {
            Ok(catalog) => catalog,
            Err(error) => {
                if !self.quiet {
                    Self::report(&source, &error);
                }
                return Err(error);
            }
        };

        if self.quiet {
            return Ok(());
        }

        for warning in warnings(&catalog) {
            println!("{}", format!("⚠️  {warning}").warning());
        }
        println!(
            "{}",
            format!(
                "✅ {source}: {} items in {} categories",
                catalog.len(),
                catalog.categories().len()
            )
            .success()
        );
        Ok(())
    }

    fn report(source: &str, error: &anyhow::Error) {
        eprintln!("{}", format!("❌ {source} is invalid").danger());
        if let Some(issues) = error
            .downcast_ref::<LoadError>()
            .and_then(LoadError::issues)
        {
            for (i, issue) in issues.iter().enumerate() {
                eprintln!("{}. {issue}", i + 1);
            }
        } else {
            for cause in error.chain().skip(1) {
                eprintln!("  {}", cause.to_string().dim());
            }
        }
    }
}
