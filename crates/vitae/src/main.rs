//! vitae CLI - renders a résumé from YAML content into a static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "vitae")]
#[command(about = "Render a résumé from YAML content into a static site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project root (defaults to the nearest directory holding vitae.toml or Contents/)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Path to config file, relative to the project root
    #[arg(short, long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the résumé site (the default when no command is given)
    Build {
        /// Output directory (defaults to config or "Output" under the project root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scaffold a new résumé project
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command.unwrap_or(Commands::Build { output: None }) {
        Commands::Build { output } => {
            let root = config::resolve_project_root(cli.root.as_deref(), &cli.config)?;
            commands::build::run(&root, &cli.config, output)?;
        }
        Commands::Init { yes } => {
            let root = match cli.root {
                Some(root) => root,
                None => std::env::current_dir()?,
            };
            commands::init::run(&root, yes)?;
        }
    }

    Ok(())
}
