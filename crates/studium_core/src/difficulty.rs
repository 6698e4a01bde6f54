//! Difficulty levels and their generation profiles.

use serde::{Deserialize, Serialize};

/// How much detail the generated material should carry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum DetailLevel {
    /// Gentle introduction for newcomers
    #[display("introductory")]
    Introductory,
    /// Default depth for everyone else
    #[display("balanced depth")]
    Balanced,
    /// Thorough coverage for experienced learners
    #[display("advanced depth")]
    Advanced,
}

/// Generation parameters derived from a difficulty string.
///
/// The mapping is case-insensitive on the user-supplied difficulty:
/// `easy` yields a short introductory course, `hard` a long advanced one,
/// and anything else (including `medium` and unrecognized values) the
/// balanced default.
///
/// # Examples
///
/// ```
/// use studium_core::DifficultyProfile;
///
/// let profile = DifficultyProfile::for_level("Hard");
/// assert_eq!(profile.chapter_count, 6);
///
/// let fallback = DifficultyProfile::for_level("extreme");
/// assert_eq!(fallback.chapter_count, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Number of chapters the prompt demands
    pub chapter_count: u32,
    /// Depth of coverage the prompt demands
    pub detail: DetailLevel,
}

impl DifficultyProfile {
    /// Map a difficulty string to its generation profile.
    pub fn for_level(level: &str) -> Self {
        match level.to_lowercase().as_str() {
            "easy" => Self {
                chapter_count: 3,
                detail: DetailLevel::Introductory,
            },
            "hard" => Self {
                chapter_count: 6,
                detail: DetailLevel::Advanced,
            },
            _ => Self {
                chapter_count: 4,
                detail: DetailLevel::Balanced,
            },
        }
    }
}
