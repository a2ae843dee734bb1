//! Calendar projection endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::enums::Action,
    services::calendar::CalendarDay,
};

use super::AuthenticatedUser;

/// Calendar range query
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalendarQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub equipment_id: Option<i32>,
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
}

/// Day-bucketed requests scheduled in [start, end]
#[utoipa::path(
    get,
    path = "/calendar",
    tag = "calendar",
    security(("bearer_auth" = [])),
    params(
        ("start" = String, Query, description = "Range start (YYYY-MM-DD)"),
        ("end" = String, Query, description = "Range end (YYYY-MM-DD), inclusive"),
        ("equipment_id" = Option<i32>, Query, description = "Filter by equipment"),
        ("team_id" = Option<i32>, Query, description = "Filter by team"),
        ("technician_id" = Option<i32>, Query, description = "Filter by technician")
    ),
    responses(
        (status = 200, description = "Day-bucketed calendar view", body = Vec<CalendarDay>),
        (status = 400, description = "Invalid range")
    )
)]
pub async fn get_calendar(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<CalendarDay>>> {
    claims.require(Action::ReadRequests)?;

    if query.end < query.start {
        return Err(AppError::Validation("end must not precede start".to_string()));
    }

    let start = query.start.and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Validation("invalid start date".to_string()))?
        .and_utc();
    let end = query.end.and_hms_opt(23, 59, 59)
        .ok_or_else(|| AppError::Validation("invalid end date".to_string()))?
        .and_utc();

    let days = state
        .services
        .calendar
        .range(start, end, query.equipment_id, query.team_id, query.technician_id)
        .await?;
    Ok(Json(days))
}
