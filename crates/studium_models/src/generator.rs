//! The production material generator: Gemini + model selection + prompt.

use async_trait::async_trait;
use tracing::{info, instrument};

use studium_core::{CourseLayout, MaterialSpec};
use studium_error::{GeminiError, GeminiErrorKind, StudiumResult};
use studium_interface::{GeneratedMaterial, JsonMode, MaterialGenerator, ModelCatalog};

use crate::config::GeminiSettings;
use crate::gemini::GeminiClient;
use crate::prompt::build_material_request;

/// Pick the backend model for a generation.
///
/// Walks `preferred` in order and returns the first identifier present in
/// `available`; falls back to an arbitrary available model; `None` when
/// the catalog is empty.
pub fn pick_model(available: &[String], preferred: &[String]) -> Option<String> {
    for candidate in preferred {
        if available.iter().any(|m| m == candidate) {
            return Some(candidate.clone());
        }
    }
    available.first().cloned()
}

/// [`MaterialGenerator`] backed by the Gemini REST client.
#[derive(Debug, Clone)]
pub struct GeminiMaterialGenerator {
    client: GeminiClient,
    settings: GeminiSettings,
}

impl GeminiMaterialGenerator {
    /// Create a generator from a client and settings.
    pub fn new(client: GeminiClient, settings: GeminiSettings) -> Self {
        Self { client, settings }
    }

    /// Create a generator from the environment with default settings.
    pub fn from_env() -> StudiumResult<Self> {
        Ok(Self::new(GeminiClient::new()?, GeminiSettings::default()))
    }
}

#[async_trait]
impl MaterialGenerator for GeminiMaterialGenerator {
    #[instrument(skip(self, spec), fields(topic = %spec.topic, difficulty = %spec.difficulty))]
    async fn generate(&self, spec: &MaterialSpec) -> StudiumResult<GeneratedMaterial> {
        let available = self.client.available_models().await?;
        let model = pick_model(&available, &self.settings.preferred_models)
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::NoModelsAvailable))?;

        info!(model, "Selected generation backend");

        let request = build_material_request(
            spec,
            &model,
            self.settings.temperature,
            self.settings.max_output_tokens,
        );

        let value = self.client.generate_json(&request).await?;
        let layout: CourseLayout = serde_json::from_value(value).map_err(|e| {
            GeminiError::new(GeminiErrorKind::MalformedOutput(format!(
                "layout did not match schema: {}",
                e
            )))
        })?;

        info!(
            model,
            chapters = layout.chapters.len(),
            "Generated study material"
        );

        Ok(GeneratedMaterial {
            model,
            prompt: spec.clone(),
            layout,
        })
    }
}
