//! Supporting types for the backend capability traits.

use serde::{Deserialize, Serialize};

/// Result of a backend health check.
///
/// The check walks candidate models in preference order and reports the
/// first one that answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Model that answered the probe
    pub model: String,
    /// The probe response text
    pub response: String,
}
