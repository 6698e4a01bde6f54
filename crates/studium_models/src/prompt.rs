//! Prompt construction for study-material generation.
//!
//! The system prompt pins the backend to a strict JSON schema; the user
//! prompt carries the actual topic/difficulty/purpose. Both feed a
//! [`GenerateRequest`] so any [`JsonMode`] backend can serve them.
//!
//! [`JsonMode`]: studium_interface::JsonMode

use studium_core::{DifficultyProfile, GenerateRequest, MaterialSpec, Message};

/// Build the fixed instruction block for a difficulty profile.
///
/// The schema and content rules mirror what the persistence layer parses:
/// `title`, `summary`, and exactly `chapter_count` chapters of
/// `{title, estimatedTime, description, bullets}`.
pub fn system_prompt(profile: &DifficultyProfile) -> String {
    format!(
        r#"Return ONLY valid JSON using the EXACT schema below.
Do NOT include anything outside the JSON (no text, no markdown, no comments).

{{
  "title": string,
  "summary": string,
  "chapters": [
    {{
      "title": string,
      "estimatedTime": string,
      "description": string,
      "bullets": string[]
    }}
  ]
}}

CONTENT RULES:
- Generate exactly {chapters} chapters at {detail}.
- Each "description" must contain 2-4 detailed paragraphs.
- Each chapter must include one explicit "Example: ..." text.
- Each bullets[] must contain 4-7 detailed bullet points.
- The result MUST be valid JSON. No trailing commas. No invalid characters.
- STRICT JSON ONLY."#,
        chapters = profile.chapter_count,
        detail = profile.detail,
    )
}

/// Build the user message for a material spec.
pub fn user_prompt(spec: &MaterialSpec) -> String {
    format!(
        r#"Generate a structured study material for the topic "{}".
Difficulty: {}
Purpose: {}"#,
        spec.topic, spec.difficulty, spec.purpose,
    )
}

/// Assemble the full generation request for a spec against a model.
pub fn build_material_request(
    spec: &MaterialSpec,
    model: &str,
    temperature: f32,
    max_output_tokens: u32,
) -> GenerateRequest {
    let profile = DifficultyProfile::for_level(&spec.difficulty);
    GenerateRequest {
        messages: vec![
            Message::system(system_prompt(&profile)),
            Message::user(user_prompt(spec)),
        ],
        max_tokens: Some(max_output_tokens),
        temperature: Some(temperature),
        model: Some(model.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studium_core::DifficultyProfile;

    fn spec(difficulty: &str) -> MaterialSpec {
        MaterialSpec {
            purpose: "exam prep".to_string(),
            topic: "Linear Algebra".to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    #[test]
    fn hard_demands_six_advanced_chapters() {
        let profile = DifficultyProfile::for_level("Hard");
        let prompt = system_prompt(&profile);
        assert!(prompt.contains("exactly 6 chapters"));
        assert!(prompt.contains("advanced depth"));
    }

    #[test]
    fn medium_and_unknown_demand_four_balanced_chapters() {
        for level in ["Medium", "whatever"] {
            let profile = DifficultyProfile::for_level(level);
            let prompt = system_prompt(&profile);
            assert!(prompt.contains("exactly 4 chapters"));
            assert!(prompt.contains("balanced depth"));
        }
    }

    #[test]
    fn system_prompt_pins_the_schema_and_rules() {
        let prompt = system_prompt(&DifficultyProfile::for_level("easy"));
        assert!(prompt.contains("\"estimatedTime\": string"));
        assert!(prompt.contains("2-4 detailed paragraphs"));
        assert!(prompt.contains("Example: ..."));
        assert!(prompt.contains("4-7 detailed bullet points"));
        assert!(prompt.contains("STRICT JSON ONLY"));
    }

    #[test]
    fn user_prompt_carries_the_spec_fields() {
        let prompt = user_prompt(&spec("Hard"));
        assert!(prompt.contains("\"Linear Algebra\""));
        assert!(prompt.contains("Difficulty: Hard"));
        assert!(prompt.contains("Purpose: exam prep"));
    }

    #[test]
    fn request_carries_model_and_generation_settings() {
        let req = build_material_request(&spec("Easy"), "gemini-2.0-flash", 0.3, 7000);
        assert_eq!(req.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(req.temperature, Some(0.3));
        assert_eq!(req.max_tokens, Some(7000));
        assert_eq!(req.messages.len(), 2);
    }
}
