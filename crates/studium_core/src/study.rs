//! Study request records and their lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a study request.
///
/// Transitions: `queued → processing → {completed | failed}`. The
/// `processing` state is re-entrant: a worker re-invoked on an already
/// processing record (duplicate event delivery, crash recovery) resumes
/// the retry loop rather than erroring, because the record, not the
/// event, is authoritative.
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
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created by the enqueue path, not yet picked up
    #[display("queued")]
    Queued,
    /// A worker invocation is (or was, at crash time) driving it
    #[display("processing")]
    Processing,
    /// Terminal: artifact persisted, snapshots recorded
    #[display("completed")]
    Completed,
    /// Terminal: attempts exhausted or permanent error
    #[display("failed")]
    Failed,
}

impl RequestStatus {
    /// Stable string form used in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Queued => "queued",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
            RequestStatus::Failed => "failed",
        }
    }

    /// Parse the stored string form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "queued" => Some(RequestStatus::Queued),
            "processing" => Some(RequestStatus::Processing),
            "completed" => Some(RequestStatus::Completed),
            "failed" => Some(RequestStatus::Failed),
            _ => None,
        }
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Failed)
    }
}

/// A durable study generation request.
///
/// Created by an external collaborator with status `queued`; the job
/// worker drives it to a terminal state. `model`, `prompt` and `output`
/// are set only on success, `error` only on terminal failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRequest {
    /// Opaque unique identifier, immutable
    pub id: Uuid,
    /// Owner reference
    pub user_id: i32,
    /// Subject to generate material for
    pub topic: String,
    /// Why the user wants the material
    pub purpose: String,
    /// User-supplied difficulty string
    pub difficulty: String,
    /// Lifecycle status
    pub status: RequestStatus,
    /// Backend identifier actually used (success only)
    pub model: Option<String>,
    /// Serialized prompt snapshot (success only)
    pub prompt: Option<String>,
    /// Serialized output snapshot (success only)
    pub output: Option<String>,
    /// Last failure description (terminal failure only)
    pub error: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Stamped on every status transition
    pub updated_at: DateTime<Utc>,
}
