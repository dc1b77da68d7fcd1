//! `webmenu tree` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use webmenu_config::{CliSettings, Config};
use webmenu_fs::discover_pages;
use webmenu_site::build_tree;

use crate::error::CliError;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Path to configuration file (default: auto-discover webmenu.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of rendered pages (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TreeArgs {
    /// Execute the tree command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or no pages are found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let source_dir = &config.docs_resolved.source_dir;

        let tree = build_tree(discover_pages(source_dir)?)
            .ok_or_else(|| CliError::NoPages(source_dir.clone()))?;
        let json = serde_json::to_string_pretty(&tree.navigation())?;
        Term::stdout().write_line(&json)?;
        Ok(())
    }
}
