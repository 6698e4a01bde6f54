//! Store capabilities consumed by the job workers.
//!
//! All mutation is via single-row conditional reads/writes keyed by
//! identifier. Workers never cache request state across invocations; every
//! invocation re-reads current status before acting, which is what keeps
//! the design correct under concurrent or duplicate event delivery.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studium_core::{NewStudyMaterial, NewUserAccount, StudyRequest, UserAccount};
use studium_error::StudiumResult;
use uuid::Uuid;

/// Success payload persisted on a completed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedGeneration {
    /// Backend model identifier
    pub model: String,
    /// Serialized prompt snapshot
    pub prompt: String,
    /// Serialized output snapshot
    pub output: String,
}

/// Durable store of study request records; the single source of truth for
/// resumability.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Load a request record by identifier.
    async fn load(&self, id: Uuid) -> StudiumResult<Option<StudyRequest>>;

    /// Conditionally transition the record to `processing` and stamp
    /// `updated_at`.
    ///
    /// The update applies only while the record is `queued` or
    /// `processing` (a compare-and-swap on status), so a re-entrant
    /// invocation is a safe no-op-equivalent and a record that has already
    /// reached a terminal state is left untouched. Returns whether a row
    /// matched.
    async fn mark_processing(&self, id: Uuid) -> StudiumResult<bool>;

    /// Transition to `completed`, recording the backend identifier and
    /// the prompt/output snapshots, and stamp `updated_at`.
    async fn complete(&self, id: Uuid, generation: &CompletedGeneration) -> StudiumResult<()>;

    /// Transition to `failed`, recording the error description, and stamp
    /// `updated_at`.
    async fn fail(&self, id: Uuid, error: &str) -> StudiumResult<()>;
}

/// Durable store of study materials (the generation artifacts).
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Find the material linked to a request, if one exists.
    async fn find_for_request(&self, request_id: Uuid) -> StudiumResult<Option<i32>>;

    /// Insert a material, suppressing duplicates on `request_id`.
    ///
    /// The store backs this with a uniqueness constraint, so two
    /// concurrent invocations that both passed the existence check cannot
    /// both insert. Returns the new identifier, or `None` when a linked
    /// material already existed and the insert was suppressed.
    async fn insert(&self, material: &NewStudyMaterial) -> StudiumResult<Option<i32>>;
}

/// Outcome of a conflict-suppressed account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisionOutcome {
    /// This invocation created the account
    Created(i32),
    /// Another invocation (or an earlier one) already created it
    AlreadyExists(i32),
}

impl ProvisionOutcome {
    /// The account identifier, whichever way it was obtained.
    pub fn account_id(&self) -> i32 {
        match self {
            ProvisionOutcome::Created(id) | ProvisionOutcome::AlreadyExists(id) => *id,
        }
    }
}

/// Durable store of user accounts and their credit ledger.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its stable sign-up identity.
    async fn find_by_external_id(&self, external_id: &str) -> StudiumResult<Option<UserAccount>>;

    /// Create an account, suppressing duplicates on `external_id`.
    ///
    /// The store backs this with a uniqueness constraint on the identity
    /// column — the application-level existence check alone cannot close
    /// the window between read and write under concurrent delivery.
    async fn create(&self, account: &NewUserAccount) -> StudiumResult<ProvisionOutcome>;

    /// Append a credit ledger entry for an account.
    async fn record_credit(&self, user_id: i32, delta: i32, reason: &str) -> StudiumResult<()>;
}
