//! Wherebuy CLI - platform provisioning tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database, collection, attributes, and indexes
//! wb-cli provision
//! ```
//!
//! # Commands
//!
//! - `provision` - Create the Wherebuy schema on the platform
//!
//! Provisioning needs a server API key (`APPWRITE_API_KEY`) with database
//! scopes; the web app itself never carries that key.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wb-cli")]
#[command(author, version, about = "Wherebuy CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the Wherebuy database schema on the platform
    Provision,
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
        Commands::Provision => commands::provision::provision().await?,
    }
    Ok(())
}
