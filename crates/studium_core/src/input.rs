//! Input types for generation requests.

use serde::{Deserialize, Serialize};

/// Supported input types for LLM requests.
///
/// Studium only drives text prompts today; the enum leaves the seam for
/// additional modalities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text input.
    Text(String),
}

impl Input {
    /// Borrow the text content, if this input is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Input::Text(text) => Some(text),
        }
    }
}
