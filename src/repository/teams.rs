//! Maintenance teams repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        team::{CreateTeam, MaintenanceTeam, UpdateTeam},
        user::UserPublic,
    },
};

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all teams
    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeam>> {
        let teams =
            sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(teams)
    }

    /// Get team by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::TeamNotFound(id))
    }

    /// Member roster for a team
    pub async fn members(&self, team_id: i32) -> AppResult<Vec<UserPublic>> {
        let members = sqlx::query_as::<_, UserPublic>(
            r#"
            SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.role, u.is_active
            FROM users u
            JOIN team_members tm ON tm.user_id = u.id
            WHERE tm.team_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    /// Whether a user belongs to a team
    pub async fn is_member(&self, team_id: i32, user_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a team, optionally seeding its roster
    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, MaintenanceTeam>(
            r#"
            INSERT INTO maintenance_teams (name, description, leader_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.leader_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(member_ids) = &data.member_ids {
            for user_id in member_ids {
                sqlx::query(
                    "INSERT INTO team_members (team_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
                )
                .bind(team.id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(team)
    }

    /// Update a team
    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>(
            r#"
            UPDATE maintenance_teams SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                leader_id = COALESCE($4, leader_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.leader_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::TeamNotFound(id))
    }

    /// Delete a team
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::TeamNotFound(id));
        }
        Ok(())
    }

    /// Add a member to a team
    pub async fn add_member(&self, team_id: i32, user_id: i32) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO team_members (team_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(team_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove a member from a team
    pub async fn remove_member(&self, team_id: i32, user_id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "User {} is not a member of team {}",
                user_id, team_id
            )));
        }
        Ok(())
    }
}
