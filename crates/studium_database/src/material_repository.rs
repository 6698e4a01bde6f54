//! Postgres implementation of the material store.

use crate::connection::SharedConnection;
use crate::models::NewStudyMaterialRow;
use async_trait::async_trait;
use diesel::prelude::*;
use studium_core::NewStudyMaterial;
use studium_error::{DatabaseError, DatabaseErrorKind, StudiumResult};
use studium_interface::MaterialStore;
use tracing::instrument;
use uuid::Uuid;

/// PostgreSQL implementation of [`MaterialStore`].
#[derive(Clone)]
pub struct PostgresMaterialStore {
    conn: SharedConnection,
}

impl PostgresMaterialStore {
    /// Create a store over a shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl MaterialStore for PostgresMaterialStore {
    async fn find_for_request(&self, request_id: Uuid) -> StudiumResult<Option<i32>> {
        use crate::schema::study_materials::dsl;

        let mut conn = self.conn.lock().await;

        dsl::study_materials
            .filter(dsl::request_id.eq(request_id))
            .select(dsl::id)
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)
            .map_err(Into::into)
    }

    #[instrument(skip(self, material), fields(request_id = ?material.request_id))]
    async fn insert(&self, material: &NewStudyMaterial) -> StudiumResult<Option<i32>> {
        use crate::schema::study_materials::dsl;

        let row = NewStudyMaterialRow {
            course_id: material.course_id.clone(),
            topic: material.topic.clone(),
            difficulty_level: material.difficulty_level.clone(),
            status: material.status.clone(),
            course_layout: serde_json::to_value(&material.layout)
                .map_err(DatabaseError::from)?,
            created_by: material.created_by.clone(),
            request_id: material.request_id,
        };

        let mut conn = self.conn.lock().await;

        // The unique index on request_id turns the lost race between two
        // concurrent duplicate-checks into a suppressed insert instead of
        // a second artifact.
        diesel::insert_into(dsl::study_materials)
            .values(&row)
            .on_conflict(dsl::request_id)
            .do_nothing()
            .returning(dsl::id)
            .get_result(&mut *conn)
            .optional()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))
            .map_err(Into::into)
    }
}
