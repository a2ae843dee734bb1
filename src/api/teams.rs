//! Maintenance team endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        enums::Action,
        team::{AddMember, CreateTeam, MaintenanceTeam, TeamDetails, UpdateTeam},
    },
};

use super::AuthenticatedUser;

/// List all teams
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All teams", body = Vec<MaintenanceTeam>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceTeam>>> {
    claims.require(Action::ReadRequests)?;
    let teams = state.services.teams.list().await?;
    Ok(Json(teams))
}

/// Get a team with its roster
#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team with members", body = TeamDetails),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TeamDetails>> {
    claims.require(Action::ReadRequests)?;
    let team = state.services.teams.get(id).await?;
    Ok(Json(team))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = MaintenanceTeam),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<MaintenanceTeam>)> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.create(&request).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Update a team
#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = MaintenanceTeam),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateTeam>,
) -> AppResult<Json<MaintenanceTeam>> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.update(id, &request).await?;
    Ok(Json(team))
}

/// Delete a team
#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Action::ManageTeams)?;
    state.services.teams.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a member to a team
#[utoipa::path(
    post,
    path = "/teams/{id}/members",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = AddMember,
    responses(
        (status = 200, description = "Member added", body = TeamDetails),
        (status = 404, description = "Team or user not found")
    )
)]
pub async fn add_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddMember>,
) -> AppResult<Json<TeamDetails>> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.add_member(id, request.user_id).await?;
    Ok(Json(team))
}

/// Remove a member from a team
#[utoipa::path(
    delete,
    path = "/teams/{id}/members/{user_id}",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Team ID"),
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Member removed", body = TeamDetails),
        (status = 404, description = "Team or membership not found")
    )
)]
pub async fn remove_member(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path((id, user_id)): Path<(i32, i32)>,
) -> AppResult<Json<TeamDetails>> {
    claims.require(Action::ManageTeams)?;
    let team = state.services.teams.remove_member(id, user_id).await?;
    Ok(Json(team))
}
