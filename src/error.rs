//! Error types for GearGuard server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchUser = 4,
    NoSuchRequest = 5,
    NoSuchEquipment = 6,
    NoSuchTeam = 7,
    BadValue = 8,
    Duplicate = 9,
    IllegalTransition = 10,
    TechnicianNotInTeam = 11,
    InvalidTechnicianRole = 12,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("User {0} not found")]
    UserNotFound(i32),

    #[error("Equipment {0} not found")]
    EquipmentNotFound(i32),

    #[error("Team {0} not found")]
    TeamNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Illegal status transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("User {0} cannot be assigned: requires technician or admin role")]
    InvalidTechnicianRole(i32),

    #[error("User {user_id} is not a member of team {team_id}")]
    TechnicianNotInTeam { user_id: i32, team_id: i32 },

    #[error("State error: {0}")]
    State(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Authentication(_) | AppError::Authorization(_) => ErrorCode::NotAuthorized,
            AppError::NotFound(_) => ErrorCode::NoSuchRequest,
            AppError::UserNotFound(_) => ErrorCode::NoSuchUser,
            AppError::EquipmentNotFound(_) => ErrorCode::NoSuchEquipment,
            AppError::TeamNotFound(_) => ErrorCode::NoSuchTeam,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Database(_) => ErrorCode::DbFailure,
            AppError::Conflict(_) => ErrorCode::Duplicate,
            AppError::InvalidTransition { .. } => ErrorCode::IllegalTransition,
            AppError::InvalidTechnicianRole(_) => ErrorCode::InvalidTechnicianRole,
            AppError::TechnicianNotInTeam { .. } => ErrorCode::TechnicianNotInTeam,
            AppError::State(_) | AppError::Internal(_) => ErrorCode::Failure,
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let (status, message) = match &self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UserNotFound(_)
            | AppError::EquipmentNotFound(_)
            | AppError::TeamNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::InvalidTransition { .. }
            | AppError::InvalidTechnicianRole(_)
            | AppError::TechnicianNotInTeam { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::State(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_codes_identify_the_resource() {
        assert_eq!(AppError::UserNotFound(1).error_code(), ErrorCode::NoSuchUser);
        assert_eq!(
            AppError::EquipmentNotFound(1).error_code(),
            ErrorCode::NoSuchEquipment
        );
        assert_eq!(AppError::TeamNotFound(1).error_code(), ErrorCode::NoSuchTeam);
        assert_eq!(
            AppError::NotFound("Request with id 9 not found".to_string()).error_code(),
            ErrorCode::NoSuchRequest
        );
    }
}

