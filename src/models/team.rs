//! Maintenance team model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::user::UserPublic;

/// Maintenance team record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceTeam {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Team with its member roster resolved
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: MaintenanceTeam,
    pub members: Vec<UserPublic>,
}

/// Create team request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeam {
    pub name: String,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
    /// Initial member user ids
    pub member_ids: Option<Vec<i32>>,
}

/// Update team request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub description: Option<String>,
    pub leader_id: Option<i32>,
}

/// Add member request
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMember {
    pub user_id: i32,
}
