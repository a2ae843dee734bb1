//! Maintenance audit log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::enums::{LogAction, RequestStatus};

/// One append-only audit entry per lifecycle action
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceLog {
    pub id: i32,
    pub request_id: i32,
    pub action: LogAction,
    pub previous_status: Option<RequestStatus>,
    pub new_status: Option<RequestStatus>,
    pub performed_by: i32,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Log entry to append; rows are never updated or deleted individually
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub request_id: i32,
    pub action: LogAction,
    pub previous_status: Option<RequestStatus>,
    pub new_status: Option<RequestStatus>,
    pub performed_by: i32,
    pub note: Option<String>,
}
