//! Trait definitions for the seams of the Studium workspace.
//!
//! Workers receive their collaborators — the generation backend and the
//! durable stores — as injected capabilities behind these traits, so that
//! tests can substitute in-memory fakes and production can wire the Gemini
//! client and Postgres repositories.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod store;
mod traits;
mod types;

pub use generator::{GeneratedMaterial, MaterialGenerator, ModelCatalog};
pub use store::{
    AccountStore, CompletedGeneration, MaterialStore, ProvisionOutcome, RequestStore,
};
pub use traits::{Health, JsonMode, StudiumDriver};
pub use types::HealthStatus;
