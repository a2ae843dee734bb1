//! Dashboard statistics endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::enums::Action,
    services::stats::StatsResponse,
};

use super::AuthenticatedUser;

/// Dashboard numbers
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    claims.require(Action::ViewStats)?;
    let stats = state.services.stats.dashboard().await?;
    Ok(Json(stats))
}
