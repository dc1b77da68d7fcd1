//! webmenu CLI - Navigation menus for static documentation sites.
//!
//! Provides commands for:
//! - `build`: Insert navigation menus into rendered pages and write the site
//! - `tree`: Print the discovered page tree as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, TreeArgs};
use output::Output;

/// webmenu - Navigation menus for static documentation sites.
#[derive(Parser)]
#[command(name = "webmenu", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert menus into every page and write the site.
    Build(BuildArgs),
    /// Print the page tree as JSON.
    Tree(TreeArgs),
}

fn main() {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Build(args) => args.verbose,
        Commands::Tree(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
    };

    if let Err(err) = result {
        Output::new().error(&err);
        std::process::exit(1);
    }
}
