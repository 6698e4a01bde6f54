//! User account types consumed by the provisioning worker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A provisioned user account.
///
/// At most one account exists per `external_id`; the store enforces this
/// with a uniqueness constraint, not just an application-level check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Internal identifier
    pub id: i32,
    /// Stable sign-up identity from the external auth provider
    pub external_id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub name: String,
    /// Credits granted
    pub credits: i32,
    /// Credits spent; `remaining = credits - used_credits`
    pub used_credits: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Credits still available to spend.
    pub fn remaining_credits(&self) -> i32 {
        self.credits - self.used_credits
    }
}

/// A new account to provision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserAccount {
    /// Stable sign-up identity
    pub external_id: String,
    /// Contact email
    pub email: String,
    /// Display name (provisioning defaults this to the email local part)
    pub name: String,
    /// Initial credit grant
    pub credits: i32,
}
