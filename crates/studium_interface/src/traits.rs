//! Trait definitions for LLM backends and their capabilities.

use crate::HealthStatus;
use async_trait::async_trait;
use studium_core::{GenerateRequest, GenerateResponse};
use studium_error::StudiumResult;

/// Core trait that all LLM backends must implement.
///
/// This provides the minimal interface for synchronous text generation.
/// Additional capabilities are exposed through optional traits.
#[async_trait]
pub trait StudiumDriver: Send + Sync {
    /// Generate model output given a request.
    async fn generate(&self, req: &GenerateRequest) -> StudiumResult<GenerateResponse>;

    /// Provider name (e.g. "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier used when the request does not name one.
    fn model_name(&self) -> &str;
}

/// Trait for backends that support structured JSON output.
///
/// Implementations must request a structured-output mode from the backend
/// (not merely ask nicely in the prompt), so that the returned value is
/// parseable JSON or the call fails.
#[async_trait]
pub trait JsonMode: StudiumDriver {
    /// Generate output as a parsed JSON value.
    async fn generate_json(&self, req: &GenerateRequest) -> StudiumResult<serde_json::Value>;
}

/// Trait for backends that support health checks.
#[async_trait]
pub trait Health: StudiumDriver {
    /// Check if the backend is available and functioning.
    async fn health(&self) -> StudiumResult<HealthStatus>;
}
