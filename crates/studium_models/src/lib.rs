//! Gemini backend integration for Studium.
//!
//! This crate provides the concrete [`MaterialGenerator`] used in
//! production: a client for the Google Generative Language REST API with
//! structured-output enforcement, a model catalog for backend selection,
//! and the prompt construction for the study-material schema.
//!
//! [`MaterialGenerator`]: studium_interface::MaterialGenerator

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod extraction;
mod generator;
pub mod gemini;
mod prompt;

pub use config::{GeminiSettings, StudiumConfig};
pub use extraction::{extract_json, parse_layout};
pub use gemini::GeminiClient;
pub use generator::{GeminiMaterialGenerator, pick_model};
pub use prompt::{build_material_request, system_prompt, user_prompt};
