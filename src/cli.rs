use std::path::{Path, PathBuf};

mod compare;
mod list;
mod play;
mod terminal;
mod text;
mod validate;

use clap::ArgAction;
use compare::Compare;
use list::List;
use play::Play;
use tracing::instrument;
use validate::Validate;
use yesnomaybe::{
    Catalog,
    domain::{Locale, config::FILE_NAME},
    storage,
};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding `ynm.toml`
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// Catalog file to use instead of the configured one
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// Language for answer labels (en, de)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let workspace = Workspace::new(self.root, self.catalog, self.locale);

        self.command
            .unwrap_or_else(|| Command::Play(Play::default()))
            .run(&workspace)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Where the configuration lives and what the command line overrides.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    config: yesnomaybe::Config,
    catalog: Option<PathBuf>,
    locale: Option<Locale>,
}

impl Workspace {
    fn new(root: PathBuf, catalog: Option<PathBuf>, locale: Option<Locale>) -> Self {
        let config = yesnomaybe::Config::load_or_default(&root);
        Self {
            root,
            config,
            catalog,
            locale,
        }
    }

    /// The label language: command line, then config.
    fn locale(&self) -> Locale {
        self.locale.unwrap_or(self.config.locale)
    }

    /// The catalog path in effect, if any.
    ///
    /// `None` means the built-in catalog.
    fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog
            .clone()
            .or_else(|| self.config.catalog_path(&self.root))
    }

    fn load_catalog(&self) -> anyhow::Result<Catalog> {
        match self.catalog_path() {
            Some(path) => Ok(storage::load_catalog(&path)?),
            None => {
                tracing::info!("No catalog configured; using the built-in catalog");
                Ok(storage::builtin_catalog()?)
            }
        }
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Answer the questionnaire as two partners and see your matches
    /// (default)
    Play(Play),

    /// Compare answers given on the command line
    Compare(Compare),

    /// List the catalog
    List(List),

    /// Check that the catalog loads
    Validate(Validate),

    /// Write a starter configuration and catalog
    Init,

    /// Show or modify configuration settings
    Config(Config),
}

impl Command {
    fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        match self {
            Self::Play(command) => command.run(workspace)?,
            Self::Compare(command) => command.run(workspace)?,
            Self::List(command) => command.run(workspace)?,
            Self::Validate(command) => command.run(workspace)?,
            Self::Init => Init::run(&workspace.root)?,
            Self::Config(command) => command.run(&workspace.root)?,
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Init;

impl Init {
    const CATALOG_FILE: &'static str = "catalog.yaml";

    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        use std::fs;

        let config_path = root.join(FILE_NAME);
        if config_path.exists() {
            anyhow::bail!("Already initialized (found existing {FILE_NAME})");
        }

        fs::create_dir_all(root)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", root.display()))?;

        let catalog_path = root.join(Self::CATALOG_FILE);
        let wrote_catalog = if catalog_path.exists() {
            tracing::info!("Keeping existing {}", catalog_path.display());
            false
        } else {
            fs::write(&catalog_path, storage::builtin_catalog_source())
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", Self::CATALOG_FILE))?;
            true
        };

        let mut config = yesnomaybe::Config::default();
        config.set_catalog(Self::CATALOG_FILE);
        config
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {FILE_NAME}: {e}"))?;

        println!("Initialized questionnaire in {}", root.display());
        println!("  Created: {FILE_NAME}");
        if wrote_catalog {
            println!("  Created: {}", Self::CATALOG_FILE);
        }
        println!();
        println!("Next steps:");
        println!("  edit {} to change the questions", Self::CATALOG_FILE);
        println!("  ynm play");

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Config {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Config {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::Colorize;

        let config_path = root.join(FILE_NAME);
        let mut config = if config_path.exists() {
            yesnomaybe::Config::load(&config_path).map_err(|e| anyhow::anyhow!("{e}"))?
        } else {
            yesnomaybe::Config::default()
        };

        match self.command {
            ConfigCommand::Show => {
                println!("Configuration:");
                println!("  locale: {}", config.locale);
                match config.catalog() {
                    Some(path) => println!("  catalog: {}", path.display()),
                    None => println!("  catalog: {}", "(built-in)".dim()),
                }
            }
            ConfigCommand::Set { key, value } => {
                match key.as_str() {
                    "locale" => {
                        config.locale = value.parse()?;
                    }
                    "catalog" => {
                        let path = root.join(&value);
                        storage::load_catalog(&path)?;
                        config.set_catalog(value);
                    }
                    _ => {
                        return Err(anyhow::anyhow!(
                            "Unknown configuration key: '{key}'\nSupported keys: locale, catalog",
                        ));
                    }
                }
                config
                    .save(&config_path)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("{}", format!("Set {key}").success());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn workspace(root: &Path) -> Workspace {
        Workspace::new(root.to_path_buf(), None, None)
    }

    #[test]
    fn init_writes_config_and_catalog() {
        let tmp = tempdir().unwrap();

        Init::run(tmp.path()).expect("init should succeed");

        let workspace = workspace(tmp.path());
        assert_eq!(
            workspace.catalog_path(),
            Some(tmp.path().join(Init::CATALOG_FILE))
        );
        let catalog = workspace.load_catalog().unwrap();
        assert_eq!(catalog, storage::builtin_catalog().unwrap());
    }

    #[test]
    fn init_twice_fails() {
        let tmp = tempdir().unwrap();
        Init::run(tmp.path()).unwrap();

        let error = Init::run(tmp.path()).unwrap_err();
        assert!(error.to_string().contains("Already initialized"));
    }

    #[test]
    fn builtin_catalog_without_config() {
        let tmp = tempdir().unwrap();
        let workspace = workspace(tmp.path());

        assert!(workspace.catalog_path().is_none());
        assert!(!workspace.load_catalog().unwrap().is_empty());
        assert_eq!(workspace.locale(), Locale::En);
    }

    #[test]
    fn command_line_overrides_config() {
        let tmp = tempdir().unwrap();
        Init::run(tmp.path()).unwrap();
        let other = tmp.path().join("other.json");
        std::fs::write(&other, "[]").unwrap();

        let workspace = Workspace::new(tmp.path().to_path_buf(), Some(other), Some(Locale::De));

        assert!(workspace.load_catalog().unwrap().is_empty());
        assert_eq!(workspace.locale(), Locale::De);
    }

    #[test]
    fn config_set_locale_persists() {
        let tmp = tempdir().unwrap();
        let set = Config {
            command: ConfigCommand::Set {
                key: "locale".to_string(),
                value: "de".to_string(),
            },
        };

        set.run(tmp.path()).unwrap();

        assert_eq!(workspace(tmp.path()).locale(), Locale::De);
    }

    #[test]
    fn config_set_catalog_must_load() {
        let tmp = tempdir().unwrap();
        let set = Config {
            command: ConfigCommand::Set {
                key: "catalog".to_string(),
                value: "missing.yaml".to_string(),
            },
        };

        assert!(set.run(tmp.path()).is_err());
        assert!(!tmp.path().join(FILE_NAME).exists());
    }

    #[test]
    fn config_rejects_unknown_key() {
        let tmp = tempdir().unwrap();
        let set = Config {
            command: ConfigCommand::Set {
                key: "colour".to_string(),
                value: "blue".to_string(),
            },
        };

        let error = set.run(tmp.path()).unwrap_err();
        assert!(error.to_string().contains("Unknown configuration key"));
    }
}
