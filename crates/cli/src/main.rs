//! Mercadito CLI - Database migrations and seeding.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! mercadito-cli migrate
//!
//! # Seed deliverers and sellers
//! mercadito-cli seed --deliverer Carlos --deliverer Marta --seller Ana
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations (includes counter provisioning)
//! - `seed` - Insert deliverers and sellers for the screen selectors

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mercadito-cli")]
#[command(author, version, about = "Mercadito CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed deliverers and sellers
    Seed {
        /// Deliverer name (repeatable)
        #[arg(long = "deliverer")]
        deliverers: Vec<String>,

        /// Seller name (repeatable)
        #[arg(long = "seller")]
        sellers: Vec<String>,
    },
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            deliverers,
            sellers,
        } => commands::seed::run(&deliverers, &sellers).await?,
    }
    Ok(())
}
