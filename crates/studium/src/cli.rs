//! Command-line interface for the Studium workers.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use studium_core::UserSignedUp;
use studium_database::{
    PostgresAccountStore, PostgresMaterialStore, PostgresRequestStore, SharedConnection,
    establish_connection, run_migrations, shared,
};
use studium_error::StudiumResult;
use studium_interface::Health;
use studium_models::{GeminiClient, GeminiMaterialGenerator, StudiumConfig};
use studium_worker::{ProvisioningWorker, StudyRequestWorker, TokioClock};
use uuid::Uuid;

/// Studium: study-material generation workers.
#[derive(Parser)]
#[command(name = "studium", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Drive a queued study request to a terminal state
    Work {
        /// Identifier of the request record to process
        request_id: Uuid,
    },

    /// Provision a user account from a sign-up payload
    Provision {
        /// Stable sign-up identity
        #[arg(long)]
        external_id: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Display name (defaults to the email local part)
        #[arg(long)]
        name: Option<String>,
    },

    /// Probe the generation backend, walking candidate models
    Ping,

    /// Show the stored status of a study request
    Status {
        /// Identifier of the request record
        request_id: Uuid,
    },

    /// Apply pending database migrations
    Migrate,
}

fn connect() -> StudiumResult<SharedConnection> {
    Ok(shared(establish_connection()?))
}

/// Run the study request worker for one request.
pub async fn run_work(request_id: Uuid) -> StudiumResult<()> {
    let conn = connect()?;
    let config = StudiumConfig::load()?;

    let worker = StudyRequestWorker::new(
        Arc::new(PostgresRequestStore::new(conn.clone())),
        Arc::new(PostgresMaterialStore::new(conn)),
        Arc::new(GeminiMaterialGenerator::new(
            GeminiClient::new()?,
            config.gemini,
        )),
        Arc::new(TokioClock),
    );

    let report = worker.run(request_id).await?;
    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    Ok(())
}

/// Run the provisioning worker for one identity.
pub async fn run_provision(
    external_id: String,
    email: String,
    name: Option<String>,
) -> StudiumResult<()> {
    let conn = connect()?;
    let worker = ProvisioningWorker::new(Arc::new(PostgresAccountStore::new(conn)));

    let report = worker
        .run(&UserSignedUp {
            name,
            email: Some(email),
            external_id: Some(external_id),
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&report).unwrap_or_default());
    Ok(())
}

/// Probe the generation backend.
pub async fn run_ping() -> StudiumResult<()> {
    let client = GeminiClient::new()?;
    let status = client.health().await?;
    println!("{}: {}", status.model, status.response.trim());
    Ok(())
}

/// Print the stored state of a request.
pub async fn run_status(request_id: Uuid) -> StudiumResult<()> {
    use studium_error::{WorkerError, WorkerErrorKind};
    use studium_interface::RequestStore;

    let conn = connect()?;
    let requests = PostgresRequestStore::new(conn);

    let record = requests.load(request_id).await?.ok_or_else(|| {
        WorkerError::new(WorkerErrorKind::RequestNotFound(request_id.to_string()))
    })?;

    println!("{}", serde_json::to_string_pretty(&record).unwrap_or_default());
    Ok(())
}

/// Apply pending migrations.
pub async fn run_migrate() -> StudiumResult<()> {
    let mut conn = establish_connection()?;
    run_migrations(&mut conn)?;
    tracing::info!("Migrations applied");
    Ok(())
}
