//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        enums::Action,
        log::MaintenanceLog,
        request::{
            AddNote, AssignTechnician, CreateRequest, RequestDetails, RequestQuery,
            TransitionRequest,
        },
    },
};

use super::AuthenticatedUser;

/// List maintenance requests
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching requests", body = Vec<RequestDetails>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<RequestDetails>>> {
    claims.require(Action::ReadRequests)?;
    let requests = state.services.lifecycle.list(&query).await?;
    Ok(Json(requests))
}

/// Get a maintenance request
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request", body = RequestDetails),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestDetails>> {
    claims.require(Action::ReadRequests)?;
    let request = state.services.lifecycle.get(id).await?;
    Ok(Json(request))
}

/// Create a maintenance request
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = RequestDetails),
        (status = 400, description = "Missing field"),
        (status = 404, description = "Equipment or team not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<RequestDetails>)> {
    claims.require(Action::WriteRequests)?;
    let created = state.services.lifecycle.create(&request, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a maintenance request (audit trail cascades)
#[utoipa::path(
    delete,
    path = "/requests/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 204, description = "Request deleted"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn delete_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Action::DeleteRequests)?;
    state.services.lifecycle.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a request along the status graph
#[utoipa::path(
    post,
    path = "/requests/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Request transitioned", body = RequestDetails),
        (status = 400, description = "Illegal transition"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn transition_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<TransitionRequest>,
) -> AppResult<Json<RequestDetails>> {
    claims.require(Action::TransitionRequests)?;
    let updated = state
        .services
        .lifecycle
        .transition(id, &request, claims.user_id)
        .await?;
    Ok(Json(updated))
}

/// Assign a technician to a request
#[utoipa::path(
    post,
    path = "/requests/{id}/assign",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = AssignTechnician,
    responses(
        (status = 200, description = "Technician assigned", body = RequestDetails),
        (status = 400, description = "Invalid technician or team mismatch"),
        (status = 404, description = "Request or technician not found")
    )
)]
pub async fn assign_technician(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignTechnician>,
) -> AppResult<Json<RequestDetails>> {
    claims.require(Action::AssignTechnician)?;
    let updated = state
        .services
        .lifecycle
        .assign_technician(id, request.technician_id, claims.user_id)
        .await?;
    Ok(Json(updated))
}

/// Append a note to a request
#[utoipa::path(
    post,
    path = "/requests/{id}/notes",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = AddNote,
    responses(
        (status = 200, description = "Note added", body = RequestDetails),
        (status = 400, description = "Empty note"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn add_note(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddNote>,
) -> AppResult<Json<RequestDetails>> {
    claims.require(Action::WriteRequests)?;
    let updated = state
        .services
        .lifecycle
        .add_note(id, &request, claims.user_id)
        .await?;
    Ok(Json(updated))
}

/// Audit trail for a request
#[utoipa::path(
    get,
    path = "/requests/{id}/logs",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Audit trail, oldest first", body = Vec<MaintenanceLog>),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request_logs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenanceLog>>> {
    claims.require(Action::ReadRequests)?;
    let logs = state.services.lifecycle.logs(id).await?;
    Ok(Json(logs))
}
