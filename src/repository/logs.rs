//! Maintenance log repository (append-only)

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::AppResult,
    models::log::{MaintenanceLog, NewLogEntry},
};

/// Insert one audit entry on the given executor. Shared with the
/// transactional request writes so the entry commits with its transition.
pub async fn insert_log<'e, E>(executor: E, entry: &NewLogEntry) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO maintenance_logs (request_id, action, previous_status, new_status, performed_by, note)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(entry.request_id)
    .bind(entry.action)
    .bind(entry.previous_status)
    .bind(entry.new_status)
    .bind(entry.performed_by)
    .bind(&entry.note)
    .execute(executor)
    .await?;
    Ok(())
}

#[derive(Clone)]
pub struct LogsRepository {
    pool: Pool<Postgres>,
}

impl LogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All entries for a request, oldest first
    pub async fn list_for_request(&self, request_id: i32) -> AppResult<Vec<MaintenanceLog>> {
        let logs = sqlx::query_as::<_, MaintenanceLog>(
            "SELECT * FROM maintenance_logs WHERE request_id = $1 ORDER BY created_at, id",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
