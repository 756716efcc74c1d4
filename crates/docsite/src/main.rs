//! docsite CLI - documentation site configuration.
//!
//! Provides commands for:
//! - `build`: Assemble the site configuration and write it as JSON
//! - `check`: Validate the declaration and report reference issues
//! - `sidebar`: Show which sidebar a page gets

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs, SidebarArgs};
use output::Output;

/// docsite - documentation site configuration.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the site configuration for the renderer.
    Build(BuildArgs),
    /// Validate the site declaration.
    Check(CheckArgs),
    /// Show the sidebar for a page path.
    Sidebar(SidebarArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Build(args) => args.site.verbose,
            Self::Check(args) => args.site.verbose,
            Self::Sidebar(args) => args.site.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
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
        Commands::Check(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
