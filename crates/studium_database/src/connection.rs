//! Database connection utilities.

use crate::DatabaseResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::sync::Arc;
use studium_error::{DatabaseError, DatabaseErrorKind};
use tokio::sync::Mutex;

/// Migrations embedded at compile time from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// A connection shared between the async store implementations.
///
/// Diesel connections are synchronous; the stores serialize access behind
/// an async mutex, which matches the single-row read/write access pattern
/// of the workers.
pub type SharedConnection = Arc<Mutex<PgConnection>>;

/// Wrap a connection for use by the Postgres stores.
pub fn shared(conn: PgConnection) -> SharedConnection {
    Arc::new(Mutex::new(conn))
}

/// Establish a connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the
/// connection string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> DatabaseResult<PgConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        DatabaseError::new(DatabaseErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    PgConnection::establish(&database_url)
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
}

/// Run any pending embedded migrations.
///
/// # Errors
///
/// Returns a migration error if a migration fails to apply.
pub fn run_migrations(conn: &mut PgConnection) -> DatabaseResult<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Migration(e.to_string())))
}
