//! Top-level error wrapper types.

use crate::{BackendError, ConfigError, GeminiError, HttpError, JsonError, WorkerError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// This is the foundation error enum. Each Studium crate contributes the
/// variants for its own failure domain.
///
/// # Examples
///
/// ```
/// use studium_error::{StudiumError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: StudiumError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StudiumErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Gemini backend error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Job worker error
    #[from(WorkerError)]
    Worker(WorkerError),
}

/// Studium error with kind discrimination.
///
/// # Examples
///
/// ```
/// use studium_error::{StudiumResult, ConfigError};
///
/// fn might_fail() -> StudiumResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Studium Error: {}", _0)]
pub struct StudiumError(Box<StudiumErrorKind>);

impl StudiumError {
    /// Create a new error from a kind.
    pub fn new(kind: StudiumErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StudiumErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to StudiumErrorKind
impl<T> From<T> for StudiumError
where
    T: Into<StudiumErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Studium operations.
///
/// # Examples
///
/// ```
/// use studium_error::{StudiumResult, HttpError};
///
/// fn fetch_data() -> StudiumResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type StudiumResult<T> = std::result::Result<T, StudiumError>;
