//! `webmenu build` command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use webmenu_config::{CliSettings, Config, MenusConfig};
use webmenu_fs::{discover_pages, write_tree};
use webmenu_menus::{
    MenuOptions, MenuRegistry, MenuSettings, apply_plugins, default_menus, insert_menus,
};
use webmenu_site::build_tree;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover webmenu.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of rendered pages (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the finished site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (timing logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, no pages are found, a page has
    /// a bad placeholder, or the site cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let report = build_site(
            &config.docs_resolved.source_dir,
            &config.docs_resolved.output_dir,
            &config.menus,
            &output,
        )?;
        tracing::info!(
            pages = report.pages,
            menus = report.menus,
            written = report.written,
            "Build finished"
        );
        Ok(())
    }
}

/// Counts reported by a finished build.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct BuildReport {
    pub pages: usize,
    pub menus: usize,
    pub written: usize,
}

/// Discover, insert menus, and write the site.
pub(crate) fn build_site(
    source_dir: &Path,
    output_dir: &Path,
    menus: &MenusConfig,
    output: &Output,
) -> Result<BuildReport, CliError> {
    let start = Instant::now();

    output.scanning(source_dir);
    let sources = discover_pages(source_dir)?;
    let mut tree =
        build_tree(sources).ok_or_else(|| CliError::NoPages(source_dir.to_path_buf()))?;
    let pages = tree.content_count();
    output.step("Found", pages, "page");

    let registry = menu_registry(menus)?;
    let summary = insert_menus(&mut tree, &registry)?;
    output.step("Inserted", summary.counter, "menu");

    output.writing(output_dir);
    let written = write_tree(&tree, output_dir)?;

    output.finished(written, start.elapsed());
    Ok(BuildReport {
        pages,
        menus: summary.counter,
        written,
    })
}

/// Assemble the registry from the default menus and configured aliases.
pub(crate) fn menu_registry(menus: &MenusConfig) -> Result<MenuRegistry, CliError> {
    let settings = MenuSettings {
        toc_heading: menus.toc_heading.clone(),
        toc_min_level: menus.toc_min_level,
        active_depth: menus
            .active_depth
            .iter()
            .map(|(name, depth)| (name.clone(), *depth))
            .collect(),
    };

    let mut registry = apply_plugins(MenuOptions::new(), default_menus(&settings));
    for (alias, target) in &menus.aliases {
        if !registry.alias(alias, target) {
            return Err(CliError::Validation(format!(
                "Menu alias \"{alias}\" points at unknown menu \"{target}\""
            )));
        }
    }
    tracing::debug!(menus = ?registry.names().collect::<Vec<_>>(), "Registered menus");
    Ok(registry)
}
