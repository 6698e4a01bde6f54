//! Postgres implementation of the account store.

use crate::connection::SharedConnection;
use crate::models::{NewCreditLedgerRow, NewUserRow, UserRow};
use async_trait::async_trait;
use diesel::prelude::*;
use studium_core::{NewUserAccount, UserAccount};
use studium_error::{DatabaseError, DatabaseErrorKind, StudiumResult};
use studium_interface::{AccountStore, ProvisionOutcome};
use tracing::instrument;

/// PostgreSQL implementation of [`AccountStore`].
#[derive(Clone)]
pub struct PostgresAccountStore {
    conn: SharedConnection,
}

impl PostgresAccountStore {
    /// Create a store over a shared connection.
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_external_id(&self, external_id: &str) -> StudiumResult<Option<UserAccount>> {
        use crate::schema::users::dsl;

        let mut conn = self.conn.lock().await;

        let row: Option<UserRow> = dsl::users
            .filter(dsl::external_id.eq(external_id))
            .select(UserRow::as_select())
            .first(&mut *conn)
            .optional()
            .map_err(DatabaseError::from)?;

        Ok(row.map(UserAccount::from))
    }

    #[instrument(skip(self, account), fields(external_id = %account.external_id))]
    async fn create(&self, account: &NewUserAccount) -> StudiumResult<ProvisionOutcome> {
        use crate::schema::users::dsl;

        let row = NewUserRow {
            external_id: account.external_id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            credits: account.credits,
        };

        let mut conn = self.conn.lock().await;

        // Unique index on external_id: two concurrent first-sight
        // invocations cannot both create. The loser sees no returned id
        // and re-reads the winner's row.
        let inserted: Option<i32> = diesel::insert_into(dsl::users)
            .values(&row)
            .on_conflict(dsl::external_id)
            .do_nothing()
            .returning(dsl::id)
            .get_result(&mut *conn)
            .optional()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?;

        if let Some(id) = inserted {
            return Ok(ProvisionOutcome::Created(id));
        }

        let existing: i32 = dsl::users
            .filter(dsl::external_id.eq(&account.external_id))
            .select(dsl::id)
            .first(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(ProvisionOutcome::AlreadyExists(existing))
    }

    async fn record_credit(&self, user_id: i32, delta: i32, reason: &str) -> StudiumResult<()> {
        use crate::schema::credit_ledger::dsl;

        let mut conn = self.conn.lock().await;

        diesel::insert_into(dsl::credit_ledger)
            .values(&NewCreditLedgerRow {
                user_id,
                request_id: None,
                delta,
                reason: reason.to_string(),
            })
            .execute(&mut *conn)
            .map_err(DatabaseError::from)?;

        Ok(())
    }
}
