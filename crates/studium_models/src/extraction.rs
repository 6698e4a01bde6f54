//! Utilities for extracting structured data from LLM responses.
//!
//! Even with a structured-output mode requested, responses occasionally
//! arrive wrapped in a markdown fence. Extraction tolerates that; anything
//! further from the contract is a parse failure, which the caller treats
//! as a permanent backend contract violation.

use studium_core::CourseLayout;
use studium_error::{GeminiError, GeminiErrorKind, StudiumResult};

/// Extract the JSON payload from a response that may carry a markdown
/// fence or stray text around the object.
///
/// # Errors
///
/// Returns an error if no JSON object is found in the response.
///
/// # Examples
///
/// ```
/// use studium_models::extract_json;
///
/// let response = "```json\n{\"title\": \"Sets\"}\n```";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("Sets"));
/// ```
pub fn extract_json(response: &str) -> StudiumResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in model response"
    );

    Err(GeminiError::new(GeminiErrorKind::MalformedOutput(format!(
        "no JSON object in response (length: {})",
        response.len()
    )))
    .into())
}

/// Parse a response into the course layout schema.
///
/// # Errors
///
/// Returns a permanent contract-violation error if the response does not
/// contain JSON matching the schema.
pub fn parse_layout(response: &str) -> StudiumResult<CourseLayout> {
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview: String = json.chars().take(100).collect();
        tracing::error!(error = %e, json_preview = %preview, "Layout parsing failed");
        GeminiError::new(GeminiErrorKind::MalformedOutput(format!(
            "layout did not match schema: {} (JSON: {}...)",
            e, preview
        )))
        .into()
    })
}

/// Extract content from a markdown code block.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence found - likely truncated response
        return Some(response[content_start..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters, handling nesting and
/// string escapes.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
