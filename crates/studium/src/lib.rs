//! Unified interface for the Studium study-material generation service.
//!
//! Re-exports the public surface of the workspace crates: core types,
//! trait seams, the Gemini backend, the Postgres stores, and the workers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use studium_core::{
    Chapter, CourseLayout, DetailLevel, DifficultyProfile, GenerateRequest, GenerateResponse,
    Input, LayoutDocument, MaterialSpec, Message, NewStudyMaterial, NewUserAccount, Output,
    RequestStatus, Role, StudyRequest, StudyRequested, UserAccount, UserSignedUp,
};
pub use studium_database::{
    PostgresAccountStore, PostgresMaterialStore, PostgresRequestStore, SharedConnection,
    establish_connection, run_migrations, shared,
};
pub use studium_error::{
    BackendError, ConfigError, DatabaseError, DatabaseErrorKind, GeminiError, GeminiErrorKind,
    HttpError, JsonError, StudiumError, StudiumErrorKind, StudiumResult, WorkerError,
    WorkerErrorKind,
};
pub use studium_interface::{
    AccountStore, CompletedGeneration, GeneratedMaterial, Health, HealthStatus, JsonMode,
    MaterialGenerator, MaterialStore, ModelCatalog, ProvisionOutcome, RequestStore, StudiumDriver,
};
pub use studium_models::{GeminiClient, GeminiMaterialGenerator, GeminiSettings, StudiumConfig};
pub use studium_worker::{
    Clock, JobReport, ProvisionReport, ProvisioningWorker, StudyRequestWorker, TokioClock,
    WELCOME_BONUS, WELCOME_BONUS_REASON, backoff,
};
