//! Vitrine CLI - builds a static showcase page from component fragments.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

use commands::config::BuildOverrides;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Builds a static showcase page from component preview fragments")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to vitrine.toml config file
    #[arg(short, long, default_value = "vitrine.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config and base template
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the showcase page
    Build {
        /// Output file (defaults to config or "index.html")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base template file (defaults to config or the built-in page)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Directory holding the component folders
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// List configured components and their preview layout
    List,
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

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            output,
            template,
            root,
        } => {
            let overrides = BuildOverrides {
                output,
                template,
                root,
            };
            commands::build::run(&cli.config, overrides)?;
        }
        Commands::List => {
            commands::list::run(&cli.config)?;
        }
    }

    Ok(())
}
