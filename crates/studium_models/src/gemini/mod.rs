//! Google Gemini backend over the Generative Language REST API.

mod client;
mod dto;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ModelInfo, ModelsListResponse, Part,
};

use studium_error::GeminiError;

/// Result type for Gemini-specific operations.
pub type GeminiResult<T> = Result<T, GeminiError>;
