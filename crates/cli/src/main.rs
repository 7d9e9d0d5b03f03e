//! Ubermelon CLI - catalog inspection and cart quotes.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog from a file or URL
//! um-cli catalog --source melons.json
//!
//! # Price a cart built from item codes (one unit per occurrence)
//! um-cli quote --source https://example.com/melons.json wm1 wm1 ca2
//! ```
//!
//! # Commands
//!
//! - `catalog` - Load and print the catalog
//! - `quote` - Build a cart and print its priced view
//!
//! `--source` falls back to `CATALOG_SOURCE` when omitted.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "um-cli")]
#[command(author, version, about = "Ubermelon CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and print every melon
    Catalog {
        /// Catalog URL or file path
        #[arg(short, long, env = "CATALOG_SOURCE")]
        source: String,
    },
    /// Price a cart built from the given item codes
    Quote {
        /// Catalog URL or file path
        #[arg(short, long, env = "CATALOG_SOURCE")]
        source: String,

        /// Item codes to add, one unit each
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ubermelon_cli=info,ubermelon_storefront=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { source } => commands::catalog::list(&source).await?,
        Commands::Quote { source, codes } => commands::quote::price(&source, &codes).await?,
    }
    Ok(())
}
