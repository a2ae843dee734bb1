//! Maintenance requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{LogAction, Priority, RequestStatus},
        log::NewLogEntry,
        request::{CreateRequest, MaintenanceRequest, RequestQuery},
    },
    repository::logs::insert_log,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// List requests with optional filters
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<MaintenanceRequest>> {
        let rows = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            SELECT * FROM maintenance_requests
            WHERE ($1::request_status IS NULL OR status = $1)
              AND ($2::request_priority IS NULL OR priority = $2)
              AND ($3::request_type IS NULL OR request_type = $3)
              AND ($4::int IS NULL OR equipment_id = $4)
              AND ($5::int IS NULL OR team_id = $5)
              AND ($6::int IS NULL OR technician_id = $6)
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.status)
        .bind(query.priority)
        .bind(query.request_type)
        .bind(query.equipment_id)
        .bind(query.team_id)
        .bind(query.technician_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Requests whose scheduled date falls within [start, end] (calendar view)
    pub async fn list_scheduled_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        equipment_id: Option<i32>,
        team_id: Option<i32>,
        technician_id: Option<i32>,
    ) -> AppResult<Vec<MaintenanceRequest>> {
        let rows = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            SELECT * FROM maintenance_requests
            WHERE scheduled_date IS NOT NULL
              AND scheduled_date >= $1 AND scheduled_date <= $2
              AND ($3::int IS NULL OR equipment_id = $3)
              AND ($4::int IS NULL OR team_id = $4)
              AND ($5::int IS NULL OR technician_id = $5)
            ORDER BY scheduled_date
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(equipment_id)
        .bind(team_id)
        .bind(technician_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new request together with its `created` audit entry.
    /// Both commit in one transaction so a request never exists without
    /// its creation record.
    pub async fn create(
        &self,
        data: &CreateRequest,
        created_by: i32,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests
                (subject, description, request_type, priority, status, equipment_id, team_id,
                 created_by, scheduled_date, schedule_type, is_recurring, estimated_hours)
            VALUES ($1, $2, $3, $4, 'new', $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&data.subject)
        .bind(&data.description)
        .bind(data.request_type)
        .bind(data.priority.unwrap_or_default())
        .bind(data.equipment_id)
        .bind(data.team_id)
        .bind(created_by)
        .bind(data.scheduled_date)
        .bind(data.schedule_type.unwrap_or_default())
        .bind(data.is_recurring.unwrap_or(false))
        .bind(data.estimated_hours)
        .fetch_one(&mut *tx)
        .await?;

        insert_log(
            &mut *tx,
            &NewLogEntry {
                request_id: request.id,
                action: LogAction::Created,
                previous_status: None,
                new_status: Some(RequestStatus::New),
                performed_by: created_by,
                note: None,
            },
        )
        .await?;

        tx.commit().await?;
        Ok(request)
    }

    /// Persist a validated transition. Writes every lifecycle-affected column
    /// from the in-memory request and appends the audit entry in the same
    /// transaction; side effects on other entities happen after commit.
    pub async fn apply_transition(
        &self,
        request: &MaintenanceRequest,
        entry: &NewLogEntry,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            UPDATE maintenance_requests SET
                status = $2,
                technician_id = $3,
                completed_by = $4,
                actual_hours = $5,
                parts_used = $6,
                total_cost = $7,
                notes = $8,
                assigned_at = $9,
                started_at = $10,
                completed_at = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request.id)
        .bind(request.status)
        .bind(request.technician_id)
        .bind(request.completed_by)
        .bind(request.actual_hours)
        .bind(&request.parts_used)
        .bind(request.total_cost)
        .bind(&request.notes)
        .bind(request.assigned_at)
        .bind(request.started_at)
        .bind(request.completed_at)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request.id)))?;

        insert_log(&mut *tx, entry).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Append a note to the embedded notes list plus its audit entry
    pub async fn append_note(
        &self,
        request: &MaintenanceRequest,
        entry: &NewLogEntry,
    ) -> AppResult<MaintenanceRequest> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, MaintenanceRequest>(
            "UPDATE maintenance_requests SET notes = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(request.id)
        .bind(&request.notes)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", request.id)))?;

        insert_log(&mut *tx, entry).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Persist the recurrence scheduler's output (fire-and-forget caller)
    pub async fn set_next_scheduled_date(
        &self,
        id: i32,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE maintenance_requests SET next_scheduled_date = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(next)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a request (audit entries cascade)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Request with id {} not found", id)));
        }
        Ok(())
    }

    /// Count requests grouped by status (for stats)
    pub async fn count_by_status(&self) -> AppResult<Vec<(RequestStatus, i64)>> {
        let rows: Vec<(RequestStatus, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM maintenance_requests GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// Count open requests grouped by priority (for stats)
    pub async fn count_open_by_priority(&self) -> AppResult<Vec<(Priority, i64)>> {
        let rows: Vec<(Priority, i64)> = sqlx::query_as(
            r#"
            SELECT priority, COUNT(*) FROM maintenance_requests
            WHERE status IN ('new', 'assigned', 'in_progress')
            GROUP BY priority
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count open requests past their scheduled date
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE status IN ('new', 'assigned', 'in_progress')
              AND scheduled_date IS NOT NULL AND scheduled_date < NOW()
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Open request counts per team (for stats)
    pub async fn count_open_by_team(&self) -> AppResult<Vec<(i32, i64)>> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT team_id, COUNT(*) FROM maintenance_requests
            WHERE status IN ('new', 'assigned', 'in_progress')
            GROUP BY team_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Upcoming recurring occurrences (for stats/dashboard)
    pub async fn count_recurring(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM maintenance_requests WHERE is_recurring AND schedule_type != 'one_time'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
