//! Error types for the Studium library.
//!
//! This crate provides the foundation error types used throughout the Studium
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use studium_error::{StudiumResult, HttpError};
//!
//! fn fetch_data() -> StudiumResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod gemini;
mod http;
mod json;
mod worker;

pub use backend::BackendError;
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{StudiumError, StudiumErrorKind, StudiumResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use worker::{WorkerError, WorkerErrorKind};
