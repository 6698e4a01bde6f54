//! PostgreSQL integration for Studium.
//!
//! This crate provides database models, schema definitions, embedded
//! migrations, and the Postgres implementations of the store capabilities
//! the workers consume.
//!
//! # Example
//!
//! ```rust,ignore
//! use studium_database::{establish_connection, shared, PostgresRequestStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = shared(establish_connection()?);
//! let requests = PostgresRequestStore::new(conn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account_repository;
mod connection;
mod material_repository;
mod models;
mod request_repository;

// Public module for external access
pub mod schema;

pub use account_repository::PostgresAccountStore;
pub use connection::{SharedConnection, establish_connection, run_migrations, shared};
pub use material_repository::PostgresMaterialStore;
pub use models::{
    CreditLedgerRow, NewCreditLedgerRow, NewStudyMaterialRow, NewUserRow, StudyMaterialRow,
    StudyRequestRow, UpdateStudyRequestRow, UserRow,
};
pub use request_repository::PostgresRequestStore;

use studium_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
