//! Exercise tracker CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! tracker-cli migrate
//!
//! # Create a demo user with a week of exercises
//! tracker-cli seed --username demo --count 7
//!
//! # Dump users as JSON lines
//! tracker-cli users
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tracker-cli")]
#[command(author, version, about = "Exercise tracker CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Create a demo user (or reuse it) and log exercises on consecutive days
    Seed {
        /// Username to create or reuse
        #[arg(short, long)]
        username: String,

        /// Number of exercises to log, ending today
        #[arg(short, long, default_value_t = 7)]
        count: usize,
    },
    /// Print all users as JSON lines
    Users,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { username, count } => commands::seed::run(&username, count).await?,
        Commands::Users => commands::users::run().await?,
    }
    Ok(())
}
