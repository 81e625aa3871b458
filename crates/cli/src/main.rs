//! Playbox CLI - database migrations and demo data.
//!
//! # Usage
//!
//! ```bash
//! # Apply storefront migrations
//! playbox-cli migrate
//!
//! # Insert the demo catalog (safe to run repeatedly)
//! playbox-cli seed
//! ```
//!
//! Both commands read `PLAYBOX_DATABASE_URL`, falling back to `DATABASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "playbox-cli")]
#[command(author, version, about = "Playbox CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo catalog
    Seed,
}

#[tokio::main]
async fn main() {
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
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed => {
            let summary = commands::seed::catalog().await?;
            tracing::info!(
                categories = summary.categories,
                products = summary.products,
                "Seeding complete"
            );
        }
    }
    Ok(())
}
