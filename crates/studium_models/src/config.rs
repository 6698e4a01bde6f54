//! Configuration loading for the Gemini backend.
//!
//! Layered the usual way: `studium.toml` in the working directory (if
//! present), then `STUDIUM_*` environment variables. Everything has a
//! default, so a bare environment with only `GEMINI_API_KEY` set works.

use serde::Deserialize;
use studium_error::{ConfigError, StudiumResult};

/// Preference-ordered model candidates, best first.
const DEFAULT_PREFERRED_MODELS: [&str; 4] = [
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-2.5-flash-lite",
];

/// Settings for the Gemini generation backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeminiSettings {
    /// Model identifiers to prefer, in order
    pub preferred_models: Vec<String>,
    /// Sampling temperature for material generation
    pub temperature: f32,
    /// Output token budget for material generation
    pub max_output_tokens: u32,
}

/// Top-level Studium configuration.
///
/// # Examples
///
/// ```no_run
/// use studium_models::StudiumConfig;
///
/// let config = StudiumConfig::load().unwrap();
/// assert!(!config.gemini.preferred_models.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudiumConfig {
    /// Gemini backend settings
    pub gemini: GeminiSettings,
}

impl StudiumConfig {
    /// Load configuration from `studium.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file exists but cannot be parsed,
    /// or if an override has the wrong shape.
    pub fn load() -> StudiumResult<Self> {
        let defaults: Vec<String> = DEFAULT_PREFERRED_MODELS
            .iter()
            .map(|m| m.to_string())
            .collect();

        let settings = config::Config::builder()
            .set_default("gemini.preferred_models", defaults)
            .map_err(|e| ConfigError::new(e.to_string()))?
            .set_default("gemini.temperature", 0.3)
            .map_err(|e| ConfigError::new(e.to_string()))?
            .set_default("gemini.max_output_tokens", 7000)
            .map_err(|e| ConfigError::new(e.to_string()))?
            .add_source(config::File::with_name("studium").required(false))
            .add_source(config::Environment::with_prefix("STUDIUM").separator("__"))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            preferred_models: DEFAULT_PREFERRED_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            temperature: 0.3,
            max_output_tokens: 7000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_carry_the_preference_order() {
        let settings = GeminiSettings::default();
        assert_eq!(settings.preferred_models[0], "gemini-2.5-pro");
        assert_eq!(settings.preferred_models.len(), 4);
        assert_eq!(settings.max_output_tokens, 7000);
    }
}
