//! Wire types for the Generative Language REST API.

use serde::{Deserialize, Serialize};

/// A `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns
    pub contents: Vec<Content>,
    /// Instructions applied outside the conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Sampling and output controls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"; absent for system instructions
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Turn content
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// A single-text turn with the given role.
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A text fragment within a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// The text content
    #[serde(default)]
    pub text: String,
}

/// Generation controls.
///
/// `response_mime_type: "application/json"` is how the structured-output
/// contract is enforced at the backend rather than hoped for in the prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Output token budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Forced response MIME type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// A `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates, best first
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of all candidates.
    pub fn text(&self) -> String {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| &content.parts)
            .map(|part| part.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// One generated candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Candidate content, absent when generation was blocked
    #[serde(default)]
    pub content: Option<Content>,
}

/// A `models` list response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsListResponse {
    /// Models the API currently serves
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// One catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// Fully qualified name, e.g. `models/gemini-2.0-flash`
    pub name: String,
}

impl ModelInfo {
    /// The bare model identifier without the `models/` prefix.
    pub fn short_name(&self) -> &str {
        self.name.strip_prefix("models/").unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let req = GenerateContentRequest {
            contents: vec![Content::text(Some("user"), "hi")],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.3),
                max_output_tokens: Some(7000),
                response_mime_type: Some("application/json".to_string()),
            }),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("generationConfig"));
        assert!(json.contains("maxOutputTokens"));
        assert!(json.contains("responseMimeType"));
        assert!(!json.contains("systemInstruction"));
    }

    #[test]
    fn response_text_joins_candidate_parts() {
        let body = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "{\"a\""}, {"text": ": 1}"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), "{\"a\": 1}");
    }

    #[test]
    fn blocked_candidates_yield_empty_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn model_names_are_stripped_of_their_prefix() {
        let info = ModelInfo {
            name: "models/gemini-2.5-pro".to_string(),
        };
        assert_eq!(info.short_name(), "gemini-2.5-pro");
    }
}
