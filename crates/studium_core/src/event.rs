//! Event payloads exchanged with external collaborators.
//!
//! The event bus itself is an external concern; these types pin down the
//! payload shapes of the two inbound contracts: "drive this request to
//! completion" and "provision this identity".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Work event emitted after a study request row is inserted with status
/// `queued`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRequested {
    /// Identifier of the request record to drive
    pub request_id: Uuid,
}

/// Sign-up event emitted once per successful registration.
///
/// Delivery is at-least-once, possibly concurrent; the provisioning
/// worker is idempotent on `external_id`. Fields are optional because the
/// payload arrives from an external system and validation is the worker's
/// first step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSignedUp {
    /// Display name, if the provider supplied one
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Stable sign-up identity
    pub external_id: Option<String>,
}
