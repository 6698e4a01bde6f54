//! Studium CLI binary.
//!
//! This binary provides command-line access to the Studium workers:
//! - Drive a study request to completion
//! - Provision a user account from a sign-up payload
//! - Probe the generation backend and query request status

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_migrate, run_ping, run_provision, run_status, run_work};

    // Load .env if present, then parse command-line arguments
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    match cli.command {
        Commands::Work { request_id } => {
            run_work(request_id).await?;
        }

        Commands::Provision {
            external_id,
            email,
            name,
        } => {
            run_provision(external_id, email, name).await?;
        }

        Commands::Ping => {
            run_ping().await?;
        }

        Commands::Status { request_id } => {
            run_status(request_id).await?;
        }

        Commands::Migrate => {
            run_migrate().await?;
        }
    }

    Ok(())
}
