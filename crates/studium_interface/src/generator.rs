//! The content generator seam: turn a material spec into a course layout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studium_core::{CourseLayout, MaterialSpec};
use studium_error::StudiumResult;

/// A successfully generated study material, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedMaterial {
    /// Identifier of the backend model actually used
    pub model: String,
    /// Snapshot of the generation inputs
    pub prompt: MaterialSpec,
    /// The parsed structured content
    pub layout: CourseLayout,
}

/// The Content Generator Client contract.
///
/// Given a spec, select an available backend, build the prompt for the
/// spec's difficulty, and return parsed structured content. Failures carry
/// enough text for the backoff policy to classify them as transient or
/// permanent; a response that violates the output schema is a permanent
/// contract violation.
#[async_trait]
pub trait MaterialGenerator: Send + Sync {
    /// Generate study material for the given spec.
    async fn generate(&self, spec: &MaterialSpec) -> StudiumResult<GeneratedMaterial>;
}

/// Query for the set of currently available backend models.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// List the model identifiers the backend currently serves.
    async fn available_models(&self) -> StudiumResult<Vec<String>>;
}
