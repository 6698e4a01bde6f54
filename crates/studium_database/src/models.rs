//! Diesel models for the Studium tables, with conversions to the core
//! domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use studium_core::{RequestStatus, StudyRequest, UserAccount};
use studium_error::{DatabaseError, DatabaseErrorKind};
use uuid::Uuid;

/// Database row for the study_requests table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::study_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudyRequestRow {
    /// Request identifier
    pub id: Uuid,
    /// Owner reference
    pub user_id: i32,
    /// Subject to generate material for
    pub topic: String,
    /// Why the user wants the material
    pub purpose: String,
    /// User-supplied difficulty string
    pub difficulty: String,
    /// Lifecycle status string
    pub status: String,
    /// Backend identifier (success only)
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

impl TryFrom<StudyRequestRow> for StudyRequest {
    type Error = DatabaseError;

    fn try_from(row: StudyRequestRow) -> Result<Self, Self::Error> {
        let status = RequestStatus::parse(&row.status).ok_or_else(|| {
            DatabaseError::new(DatabaseErrorKind::Serialization(format!(
                "unknown request status '{}'",
                row.status
            )))
        })?;

        Ok(StudyRequest {
            id: row.id,
            user_id: row.user_id,
            topic: row.topic,
            purpose: row.purpose,
            difficulty: row.difficulty,
            status,
            model: row.model,
            prompt: row.prompt,
            output: row.output,
            error: row.error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Updateable struct for study request status transitions.
///
/// `None` fields are left untouched, so the success and failure updates
/// each write only their own columns.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = crate::schema::study_requests)]
pub struct UpdateStudyRequestRow {
    /// New status string
    pub status: Option<String>,
    /// Backend identifier
    pub model: Option<String>,
    /// Serialized prompt snapshot
    pub prompt: Option<String>,
    /// Serialized output snapshot
    pub output: Option<String>,
    /// Failure description
    pub error: Option<String>,
    /// Transition timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for the study_materials table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::study_materials)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StudyMaterialRow {
    /// Material identifier
    pub id: i32,
    /// External course identifier
    pub course_id: String,
    /// Subject the material covers
    pub topic: String,
    /// Difficulty string carried over from the request
    pub difficulty_level: String,
    /// Material status
    pub status: String,
    /// The generated content blob
    pub course_layout: serde_json::Value,
    /// Owner reference
    pub created_by: String,
    /// Originating request, if created by the worker
    pub request_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for a new study material.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::study_materials)]
pub struct NewStudyMaterialRow {
    /// External course identifier
    pub course_id: String,
    /// Subject the material covers
    pub topic: String,
    /// Difficulty string carried over from the request
    pub difficulty_level: String,
    /// Material status
    pub status: String,
    /// The generated content blob
    pub course_layout: serde_json::Value,
    /// Owner reference
    pub created_by: String,
    /// Originating request, if created by the worker
    pub request_id: Option<Uuid>,
}

/// Database row for the users table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Account identifier
    pub id: i32,
    /// Stable sign-up identity
    pub external_id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub name: String,
    /// Credits granted
    pub credits: i32,
    /// Credits spent
    pub used_credits: i32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        UserAccount {
            id: row.id,
            external_id: row.external_id,
            email: row.email,
            name: row.name,
            credits: row.credits,
            used_credits: row.used_credits,
            created_at: row.created_at,
        }
    }
}

/// Insertable struct for a new user account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserRow {
    /// Stable sign-up identity
    pub external_id: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub name: String,
    /// Initial credit grant
    pub credits: i32,
}

/// Database row for the credit_ledger table.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::credit_ledger)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreditLedgerRow {
    /// Entry identifier
    pub id: i32,
    /// Account the delta applies to
    pub user_id: i32,
    /// Related request, if any
    pub request_id: Option<Uuid>,
    /// Signed credit delta
    pub delta: i32,
    /// Why the delta was recorded
    pub reason: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for a new ledger entry.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::credit_ledger)]
pub struct NewCreditLedgerRow {
    /// Account the delta applies to
    pub user_id: i32,
    /// Related request, if any
    pub request_id: Option<Uuid>,
    /// Signed credit delta
    pub delta: i32,
    /// Why the delta was recorded
    pub reason: String,
}
