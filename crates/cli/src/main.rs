//! Multishop CLI - Schema evolution and settings tools.
//!
//! # Usage
//!
//! ```bash
//! # List registered migrations
//! ms-cli migrate list
//!
//! # Run every non-destructive migration
//! ms-cli migrate run
//!
//! # Run named migrations, including destructive steps
//! ms-cli migrate run recreate_site_settings --allow-destructive
//!
//! # Seed site settings from YAML
//! ms-cli seed settings -f settings.yaml --overwrite
//! ```
//!
//! # Commands
//!
//! - `migrate` - Inspect and run schema migrations
//! - `seed` - Load site settings

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ms-cli")]
#[command(author, version, about = "Multishop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and run schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Seed database content
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// List registered migrations and their steps
    List,
    /// Run migrations (all non-destructive ones when no name is given)
    Run {
        /// Migration names, run in the order given
        names: Vec<String>,

        /// Allow steps that drop and re-create tables
        #[arg(long)]
        allow_destructive: bool,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed site settings from a YAML file
    Settings {
        /// Path to the YAML file
        #[arg(short, long)]
        file: String,

        /// Replace values of settings that already exist
        #[arg(long)]
        overwrite: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::List => commands::migrate::list(),
            MigrateAction::Run {
                names,
                allow_destructive,
            } => commands::migrate::run(&names, allow_destructive).await?,
        },
        Commands::Seed { target } => match target {
            SeedTarget::Settings { file, overwrite } => {
                commands::seed::settings(&file, overwrite).await?;
            }
        },
    }
    Ok(())
}
