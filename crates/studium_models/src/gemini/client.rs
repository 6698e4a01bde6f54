//! Client for the Google Generative Language REST API.
//!
//! The client speaks the `generateContent` and `models` endpoints directly
//! over `reqwest`. Two details matter to callers:
//!
//! - structured output is requested through the generation config
//!   (`responseMimeType: "application/json"`), not just prompt discipline;
//! - HTTP failures keep their status code in the error message, which is
//!   what the worker's backoff policy classifies on.

use async_trait::async_trait;
use std::env;
use tracing::{debug, instrument};

use studium_core::{GenerateRequest, GenerateResponse, Output, Role};
use studium_error::{GeminiError, GeminiErrorKind, StudiumResult};
use studium_interface::{Health, HealthStatus, JsonMode, ModelCatalog, StudiumDriver};

use super::GeminiResult;
use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ModelsListResponse,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";

/// Candidate models for the health probe, best first. Mirrors the
/// generation preference order plus the lite fallbacks worth pinging.
const PING_CANDIDATES: [&str; 7] = [
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-2.0-flash-001",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash-lite",
    "gemini-2.0-flash-lite-001",
];

/// Client for the Gemini REST API.
///
/// # Example
///
/// ```no_run
/// use studium_models::GeminiClient;
/// use studium_core::{GenerateRequest, Message};
/// use studium_interface::StudiumDriver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClient::new()?;
/// let request = GenerateRequest {
///     messages: vec![Message::user("Hello")],
///     ..Default::default()
/// };
/// let response = client.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> StudiumResult<Self> {
        Self::new_internal().map_err(Into::into)
    }

    /// Create a client against a non-default API endpoint.
    ///
    /// Intended for tests pointing at a local stub server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model_name: DEFAULT_MODEL.to_string(),
        }
    }

    /// Internal constructor that returns Gemini-specific errors.
    fn new_internal() -> GeminiResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL.to_string(),
        })
    }

    /// Build the wire request from a generic generation request.
    ///
    /// Gemini keeps system instructions outside the conversation, so the
    /// last system message maps to `systemInstruction` and the remaining
    /// turns to `contents` with user/model roles.
    fn build_body(req: &GenerateRequest, response_mime_type: Option<&str>) -> GenerateContentRequest {
        let mut system_instruction = None;
        let mut contents = Vec::new();

        for msg in &req.messages {
            let text: String = msg
                .content
                .iter()
                .filter_map(|input| input.as_text())
                .collect::<Vec<_>>()
                .join("\n");

            match msg.role {
                Role::System => system_instruction = Some(Content::text(None, text)),
                Role::User => contents.push(Content::text(Some("user"), text)),
                Role::Assistant => contents.push(Content::text(Some("model"), text)),
            }
        }

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_tokens,
                response_mime_type: response_mime_type.map(str::to_string),
            }),
        }
    }

    /// Execute `generateContent` and return the response text.
    async fn generate_text(
        &self,
        req: &GenerateRequest,
        response_mime_type: Option<&str>,
    ) -> GeminiResult<String> {
        let model = req.model.as_deref().unwrap_or(&self.model_name);
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let body = Self::build_body(req, response_mime_type);

        debug!(model, "Sending generateContent request");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let text = parsed.text();
        if text.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse(
                model.to_string(),
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl StudiumDriver for GeminiClient {
    async fn generate(&self, req: &GenerateRequest) -> StudiumResult<GenerateResponse> {
        let text = self.generate_text(req, None).await?;
        Ok(GenerateResponse {
            outputs: vec![Output::Text(text)],
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[async_trait]
impl JsonMode for GeminiClient {
    async fn generate_json(&self, req: &GenerateRequest) -> StudiumResult<serde_json::Value> {
        let text = self
            .generate_text(req, Some("application/json"))
            .await?;

        serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(100).collect();
            GeminiError::new(GeminiErrorKind::MalformedOutput(format!(
                "structured mode returned invalid JSON: {} (text: {}...)",
                e, preview
            )))
            .into()
        })
    }
}

#[async_trait]
impl ModelCatalog for GeminiClient {
    #[instrument(skip(self))]
    async fn available_models(&self) -> StudiumResult<Vec<String>> {
        let url = format!("{}/v1/models?key={}", self.base_url, self.api_key);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            })
            .into());
        }

        let parsed: ModelsListResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let models: Vec<String> = parsed
            .models
            .iter()
            .map(|m| m.short_name().to_string())
            .collect();

        debug!(count = models.len(), "Fetched model catalog");

        Ok(models)
    }
}

#[async_trait]
impl Health for GeminiClient {
    /// Probe candidate models in order and report the first that answers.
    async fn health(&self) -> StudiumResult<HealthStatus> {
        for candidate in PING_CANDIDATES {
            let req = GenerateRequest {
                messages: vec![studium_core::Message::user("Say 'pong'")],
                model: Some(candidate.to_string()),
                ..Default::default()
            };

            match self.generate_text(&req, None).await {
                Ok(text) => {
                    return Ok(HealthStatus {
                        model: candidate.to_string(),
                        response: text,
                    });
                }
                Err(e) => {
                    debug!(model = candidate, error = %e, "Ping candidate failed");
                }
            }
        }

        Err(GeminiError::new(GeminiErrorKind::NoModelsAvailable).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studium_core::Message;

    #[test]
    fn system_messages_become_system_instruction() {
        let req = GenerateRequest {
            messages: vec![Message::system("rules"), Message::user("topic")],
            ..Default::default()
        };
        let body = GeminiClient::build_body(&req, Some("application/json"));

        assert!(body.system_instruction.is_some());
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].role.as_deref(), Some("user"));
        let config = body.generation_config.unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn generation_settings_pass_through() {
        let req = GenerateRequest {
            messages: vec![Message::user("hi")],
            temperature: Some(0.3),
            max_tokens: Some(7000),
            ..Default::default()
        };
        let body = GeminiClient::build_body(&req, None);
        let config = body.generation_config.unwrap();
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(config.max_output_tokens, Some(7000));
        assert_eq!(config.response_mime_type, None);
    }
}
