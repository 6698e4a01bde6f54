//! The provisioning worker: materialize an account on first sight of an
//! identity.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studium_core::{NewUserAccount, UserSignedUp};
use studium_error::{StudiumResult, WorkerError, WorkerErrorKind};
use studium_interface::{AccountStore, ProvisionOutcome};
use tracing::{info, instrument};

/// One-time credit grant for a newly provisioned account.
pub const WELCOME_BONUS: i32 = 5;

/// Ledger reason recorded with the grant.
pub const WELCOME_BONUS_REASON: &str = "welcome.bonus";

/// Outcome of one provisioning invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionReport {
    /// The account identifier, created or found
    pub user_id: i32,
    /// Whether this invocation created the account
    pub created: bool,
}

/// Idempotently provisions a user account from a sign-up event.
///
/// Delivery of sign-up events is at-least-once and possibly concurrent.
/// The lookup-then-create sequence here is the fast path; the store's
/// uniqueness constraint on the identity column is what actually holds
/// the at-most-one invariant, and the welcome bonus is granted only by
/// the invocation whose insert won.
pub struct ProvisioningWorker {
    accounts: Arc<dyn AccountStore>,
}

impl ProvisioningWorker {
    /// Create a worker from its store capability.
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        Self { accounts }
    }

    /// Provision the identity carried by the event.
    ///
    /// # Errors
    ///
    /// Fails immediately (non-retryable) if the event is missing `email`
    /// or `external_id`.
    #[instrument(skip(self, event), fields(external_id = ?event.external_id))]
    pub async fn run(&self, event: &UserSignedUp) -> StudiumResult<ProvisionReport> {
        let email = event
            .email
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| WorkerError::new(WorkerErrorKind::MissingField("email".to_string())))?;
        let external_id = event.external_id.as_deref().filter(|s| !s.is_empty()).ok_or_else(
            || WorkerError::new(WorkerErrorKind::MissingField("externalId".to_string())),
        )?;

        if let Some(existing) = self.accounts.find_by_external_id(external_id).await? {
            return Ok(ProvisionReport {
                user_id: existing.id,
                created: false,
            });
        }

        let name = event
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                email
                    .split('@')
                    .next()
                    .unwrap_or(email)
                    .to_string()
            });

        let outcome = self
            .accounts
            .create(&NewUserAccount {
                external_id: external_id.to_string(),
                email: email.to_string(),
                name,
                credits: WELCOME_BONUS,
            })
            .await?;

        match outcome {
            ProvisionOutcome::Created(user_id) => {
                self.accounts
                    .record_credit(user_id, WELCOME_BONUS, WELCOME_BONUS_REASON)
                    .await?;
                info!(user_id, "Provisioned account with welcome bonus");
                Ok(ProvisionReport {
                    user_id,
                    created: true,
                })
            }
            // Lost the race against a concurrent invocation; the winner
            // granted the bonus.
            ProvisionOutcome::AlreadyExists(user_id) => Ok(ProvisionReport {
                user_id,
                created: false,
            }),
        }
    }
}
