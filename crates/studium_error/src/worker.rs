//! Job worker error types.

/// Worker error conditions.
///
/// These cover the non-retryable input failures of the job workers: a
/// malformed or missing identifier in the triggering event, or a record
/// that the event refers to but the store does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum WorkerErrorKind {
    /// The triggering event was missing a required field
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// The referenced request record does not exist
    #[display("Request {} not found", _0)]
    RequestNotFound(String),
}

/// Worker error with source location tracking.
///
/// # Examples
///
/// ```
/// use studium_error::{WorkerError, WorkerErrorKind};
///
/// let err = WorkerError::new(WorkerErrorKind::MissingField("email".into()));
/// assert!(format!("{}", err).contains("email"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Worker Error: {} at line {} in {}", kind, line, file)]
pub struct WorkerError {
    /// The kind of error that occurred
    pub kind: WorkerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WorkerError {
    /// Create a new WorkerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: WorkerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
