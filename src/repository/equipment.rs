//! Equipment repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM equipment
            WHERE ($1::equipment_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::int IS NULL OR assigned_team_id = $3)
            ORDER BY name
            "#,
        )
        .bind(query.status)
        .bind(&query.category)
        .bind(query.team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::EquipmentNotFound(id))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, serial_number, category, location, purchase_date,
                                   warranty_until, assigned_team_id, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.category)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_until)
        .bind(data.assigned_team_id)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = COALESCE($2, name),
                serial_number = COALESCE($3, serial_number),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                status = COALESCE($6, status),
                purchase_date = COALESCE($7, purchase_date),
                warranty_until = COALESCE($8, warranty_until),
                assigned_team_id = COALESCE($9, assigned_team_id),
                notes = COALESCE($10, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.category)
        .bind(&data.location)
        .bind(data.status)
        .bind(data.purchase_date)
        .bind(data.warranty_until)
        .bind(data.assigned_team_id)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::EquipmentNotFound(id))
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::EquipmentNotFound(id));
        }
        Ok(())
    }

    /// Set equipment status (lifecycle side effect)
    pub async fn set_status(&self, id: i32, status: EquipmentStatus) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE equipment SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::EquipmentNotFound(id));
        }
        Ok(())
    }

    /// Stamp maintenance dates after a completed request
    pub async fn set_maintenance_dates(
        &self,
        id: i32,
        last: DateTime<Utc>,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE equipment
            SET last_maintenance_date = $2,
                next_maintenance_date = $3,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(last)
        .bind(next)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Count equipment grouped by status (for stats)
    pub async fn count_by_status(&self) -> AppResult<Vec<(EquipmentStatus, i64)>> {
        let rows: Vec<(EquipmentStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM equipment GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
