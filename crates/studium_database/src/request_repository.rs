//! Postgres implementation of the request store.

use crate::connection::SharedConnection;
use crate::models::{StudyRequestRow, UpdateStudyRequestRow};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use studium_core::{RequestStatus, StudyRequest};
use studium_error::{DatabaseError, StudiumResult};
use studium_interface::{CompletedGeneration, RequestStore};
use tracing::instrument;
use uuid::Uuid;

/// PostgreSQL implementation of [`RequestStore`].
#[derive(Clone)]
pub struct PostgresRequestStore {
    conn: SharedConnection,
}

impl PostgresRequestStore {
    /// Create a store over a shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RequestStore for PostgresRequestStore {
    async fn load(&self, id: Uuid) -> StudiumResult<Option<StudyRequest>> {
        use crate::schema::study_requests::dsl;

        let mut conn = self.conn.lock().await;

        let row: Option<StudyRequestRow> = dsl::study_requests
            .filter(dsl::id.eq(id))
            .select(StudyRequestRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        row.map(StudyRequest::try_from)
            .transpose()
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn mark_processing(&self, id: Uuid) -> StudiumResult<bool> {
        use crate::schema::study_requests::dsl;

        let mut conn = self.conn.lock().await;

        // Compare-and-swap on status: terminal records are left untouched
        // even if a stale event arrives after completion.
        let matched = diesel::update(
            dsl::study_requests.filter(dsl::id.eq(id)).filter(
                dsl::status.eq_any(vec![
                    RequestStatus::Queued.as_str(),
                    RequestStatus::Processing.as_str(),
                ]),
            ),
        )
        .set((
            dsl::status.eq(RequestStatus::Processing.as_str()),
            dsl::updated_at.eq(Utc::now()),
        ))
        .execute(&mut *conn)
        .map_err(DatabaseError::from)?;

        Ok(matched > 0)
    }

    #[instrument(skip(self, generation))]
    async fn complete(&self, id: Uuid, generation: &CompletedGeneration) -> StudiumResult<()> {
        use crate::schema::study_requests::dsl;

        let mut conn = self.conn.lock().await;

        diesel::update(dsl::study_requests.filter(dsl::id.eq(id)))
            .set(&UpdateStudyRequestRow {
                status: Some(RequestStatus::Completed.as_str().to_string()),
                model: Some(generation.model.clone()),
                prompt: Some(generation.prompt.clone()),
                output: Some(generation.output.clone()),
                error: None,
                updated_at: Some(Utc::now()),
            })
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fail(&self, id: Uuid, error: &str) -> StudiumResult<()> {
        use crate::schema::study_requests::dsl;

        let mut conn = self.conn.lock().await;

        diesel::update(dsl::study_requests.filter(dsl::id.eq(id)))
            .set(&UpdateStudyRequestRow {
                status: Some(RequestStatus::Failed.as_str().to_string()),
                error: Some(error.to_string()),
                updated_at: Some(Utc::now()),
                ..Default::default()
            })
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }
}
