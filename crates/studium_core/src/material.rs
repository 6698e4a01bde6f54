//! Study material types: generation inputs and the generated course layout.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input parameters for one material generation.
///
/// This is also the prompt snapshot persisted on the request record after a
/// successful generation, so it derives `Serialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Why the user wants the material (e.g. "exam prep", "practice")
    pub purpose: String,
    /// Subject to generate material for
    pub topic: String,
    /// User-supplied difficulty string ("Easy" | "Medium" | "Hard" | free text)
    pub difficulty: String,
}

/// A single chapter of generated study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Chapter title
    pub title: String,
    /// Estimated reading/study time, free-form (e.g. "45 minutes")
    pub estimated_time: String,
    /// Chapter body, 2-4 paragraphs including a worked example
    pub description: String,
    /// 4-7 key points
    pub bullets: Vec<String>,
}

/// The structured course layout produced by the generation backend.
///
/// This is the strict schema the prompt demands; parsing the backend's
/// response into this type is the output contract check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseLayout {
    /// Course title
    pub title: String,
    /// One-paragraph course summary
    pub summary: String,
    /// Ordered chapters
    pub chapters: Vec<Chapter>,
}

/// A persisted layout document.
///
/// Parse failures are explicit: a document is either the structured layout
/// or the raw text we could not parse, never a string silently wrapped in
/// an object. Serialized untagged, so the stored JSON is the layout object
/// itself (or a bare string for the raw case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutDocument {
    /// Layout that satisfied the output contract
    Structured(CourseLayout),
    /// Raw backend text that did not parse
    RawText(String),
}

impl LayoutDocument {
    /// Borrow the structured layout, if this document parsed.
    pub fn as_structured(&self) -> Option<&CourseLayout> {
        match self {
            LayoutDocument::Structured(layout) => Some(layout),
            LayoutDocument::RawText(_) => None,
        }
    }
}

/// A new study material to persist (the Artifact of a generation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudyMaterial {
    /// External course identifier (worker path: `REQ-<request-id>`)
    pub course_id: String,
    /// Subject the material covers
    pub topic: String,
    /// Difficulty string carried over from the request
    pub difficulty_level: String,
    /// Material status (worker inserts "ready")
    pub status: String,
    /// The generated content blob
    pub layout: LayoutDocument,
    /// Owner reference
    pub created_by: String,
    /// Originating request, if created by the worker (the synchronous
    /// creation path inserts without linkage)
    pub request_id: Option<Uuid>,
}
