//! Lifecycle engine for maintenance requests
//!
//! Owns the status state machine, timestamp stamping, audit trail and the
//! side effects on equipment and recurrence scheduling. The primary status
//! write and its audit entry commit in one transaction; equipment and
//! recurrence writes run after commit and are log-only on failure.

use axum::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, LogAction, RequestStatus, Role, ScheduleType},
        log::{MaintenanceLog, NewLogEntry},
        request::{
            compute_total_cost, AddNote, CreateRequest, MaintenanceRequest, RequestDetails,
            RequestNote, RequestQuery, TransitionRequest,
        },
    },
    repository::Repository,
    services::recurrence,
};

#[derive(Clone)]
pub struct LifecycleService {
    repository: Repository,
}

impl LifecycleService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List requests with filters
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<RequestDetails>> {
        let requests = self.repository.requests.list(query).await?;
        Ok(requests.into_iter().map(RequestDetails::from).collect())
    }

    /// Get a single request
    pub async fn get(&self, id: i32) -> AppResult<RequestDetails> {
        let request = self.repository.requests.get_by_id(id).await?;
        Ok(request.into())
    }

    /// Audit trail for a request
    pub async fn logs(&self, id: i32) -> AppResult<Vec<MaintenanceLog>> {
        // 404 before returning an empty trail for an unknown id
        self.repository.requests.get_by_id(id).await?;
        self.repository.logs.list_for_request(id).await
    }

    /// Create a new request in status `new`
    pub async fn create(&self, data: &CreateRequest, actor_id: i32) -> AppResult<RequestDetails> {
        if data.subject.trim().is_empty() {
            return Err(AppError::Validation("subject is required".to_string()));
        }
        if data.description.trim().is_empty() {
            return Err(AppError::Validation("description is required".to_string()));
        }

        // Referenced records must resolve before anything is written
        self.repository.equipment.get_by_id(data.equipment_id).await?;
        self.repository.teams.get_by_id(data.team_id).await?;

        let request = self.repository.requests.create(data, actor_id).await?;

        tracing::info!(request_id = request.id, "Maintenance request created");
        Ok(request.into())
    }

    /// Delete a request; its audit entries cascade with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.requests.delete(id).await
    }

    /// Move a request along the status graph
    pub async fn transition(
        &self,
        id: i32,
        data: &TransitionRequest,
        actor_id: i32,
    ) -> AppResult<RequestDetails> {
        let mut request = self.repository.requests.get_by_id(id).await?;
        let previous = request.status;
        let target = data.status;

        if !previous.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: previous.to_string(),
                to: target.to_string(),
            });
        }

        let now = Utc::now();
        request.status = target;

        match target {
            RequestStatus::Assigned => {
                if request.assigned_at.is_none() {
                    request.assigned_at = Some(now);
                }
            }
            RequestStatus::InProgress => {
                if request.started_at.is_none() {
                    request.started_at = Some(now);
                }
            }
            RequestStatus::Completed => {
                if request.completed_at.is_none() {
                    request.completed_at = Some(now);
                }
                request.completed_by = Some(actor_id);
                request.actual_hours =
                    Some(data.actual_hours.or(request.actual_hours).unwrap_or(Decimal::ZERO));
                if let Some(parts) = &data.parts_used {
                    request.total_cost = compute_total_cost(parts);
                    request.parts_used.0 = parts.clone();
                }
            }
            RequestStatus::Cancelled | RequestStatus::Scrap => {}
            RequestStatus::New => unreachable!("no edge leads back to new"),
        }

        // A note supplied with a transition lands in the embedded notes list
        // and is mirrored in the single audit entry for the transition.
        let note = data
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        if let Some(content) = &note {
            request.notes.0.push(RequestNote {
                content: content.clone(),
                author_id: actor_id,
                created_at: now,
            });
        }

        let entry = NewLogEntry {
            request_id: request.id,
            action: log_action_for(target),
            previous_status: Some(previous),
            new_status: Some(target),
            performed_by: actor_id,
            note,
        };

        let updated = self.repository.requests.apply_transition(&request, &entry).await?;

        tracing::info!(
            request_id = id,
            from = %previous,
            to = %target,
            "Request transitioned"
        );

        settle_side_effects(&self.repository, &updated, target).await;

        Ok(updated.into())
    }

    /// Assign a technician; sets status to `assigned` from `new`, or swaps
    /// the technician on an already-assigned request. Team membership is a
    /// point-in-time check captured at assignment.
    pub async fn assign_technician(
        &self,
        id: i32,
        technician_id: i32,
        actor_id: i32,
    ) -> AppResult<RequestDetails> {
        let mut request = self.repository.requests.get_by_id(id).await?;
        let previous = request.status;

        if !matches!(previous, RequestStatus::New | RequestStatus::Assigned) {
            return Err(AppError::InvalidTransition {
                from: previous.to_string(),
                to: RequestStatus::Assigned.to_string(),
            });
        }

        let technician = self.repository.users.get_by_id(technician_id).await?;

        if !matches!(technician.role, Role::Technician | Role::Admin) {
            return Err(AppError::InvalidTechnicianRole(technician_id));
        }

        if !self.repository.teams.is_member(request.team_id, technician_id).await? {
            return Err(AppError::TechnicianNotInTeam {
                user_id: technician_id,
                team_id: request.team_id,
            });
        }

        request.technician_id = Some(technician_id);
        request.status = RequestStatus::Assigned;
        if request.assigned_at.is_none() {
            request.assigned_at = Some(Utc::now());
        }

        let entry = NewLogEntry {
            request_id: request.id,
            action: LogAction::Assigned,
            previous_status: Some(previous),
            new_status: Some(RequestStatus::Assigned),
            performed_by: actor_id,
            note: Some(format!("Assigned to {}", technician.username)),
        };

        let updated = self.repository.requests.apply_transition(&request, &entry).await?;

        tracing::info!(request_id = id, technician_id, "Technician assigned");
        Ok(updated.into())
    }

    /// Append a note; one `note_added` audit entry per note
    pub async fn add_note(&self, id: i32, data: &AddNote, actor_id: i32) -> AppResult<RequestDetails> {
        let content = data.content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("note content must not be empty".to_string()));
        }

        let mut request = self.repository.requests.get_by_id(id).await?;
        request.notes.0.push(RequestNote {
            content: content.to_string(),
            author_id: actor_id,
            created_at: Utc::now(),
        });

        let entry = NewLogEntry {
            request_id: request.id,
            action: LogAction::NoteAdded,
            previous_status: None,
            new_status: None,
            performed_by: actor_id,
            note: Some(content.to_string()),
        };

        let updated = self.repository.requests.append_note(&request, &entry).await?;
        Ok(updated.into())
    }
}

/// Post-commit writes on collaborator entities. Implemented by `Repository`
/// in production; tests swap in a double to fail individual writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SideEffectWrites: Send + Sync {
    async fn set_equipment_status(
        &self,
        equipment_id: i32,
        status: EquipmentStatus,
    ) -> AppResult<()>;

    async fn set_equipment_maintenance_dates(
        &self,
        equipment_id: i32,
        last: DateTime<Utc>,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    async fn set_next_scheduled_date(
        &self,
        request_id: i32,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()>;
}

#[async_trait]
impl SideEffectWrites for Repository {
    async fn set_equipment_status(
        &self,
        equipment_id: i32,
        status: EquipmentStatus,
    ) -> AppResult<()> {
        self.equipment.set_status(equipment_id, status).await
    }

    async fn set_equipment_maintenance_dates(
        &self,
        equipment_id: i32,
        last: DateTime<Utc>,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        self.equipment.set_maintenance_dates(equipment_id, last, next).await
    }

    async fn set_next_scheduled_date(
        &self,
        request_id: i32,
        next: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        self.requests.set_next_scheduled_date(request_id, next).await
    }
}

/// Post-commit side effects. The transition is already durable at this
/// point; failures here are logged, never rolled back into the caller.
async fn settle_side_effects<S: SideEffectWrites>(
    store: &S,
    request: &MaintenanceRequest,
    target: RequestStatus,
) {
    match target {
        RequestStatus::InProgress => {
            if let Err(e) = store
                .set_equipment_status(request.equipment_id, EquipmentStatus::UnderMaintenance)
                .await
            {
                tracing::warn!(
                    request_id = request.id,
                    equipment_id = request.equipment_id,
                    error = %e,
                    "Failed to mark equipment under maintenance"
                );
            }
        }
        RequestStatus::Completed => {
            schedule_next_occurrence(store, request).await;
            stamp_equipment_maintenance(store, request).await;
        }
        RequestStatus::Scrap => {
            if let Err(e) = store
                .set_equipment_status(request.equipment_id, EquipmentStatus::Scrapped)
                .await
            {
                tracing::warn!(
                    request_id = request.id,
                    equipment_id = request.equipment_id,
                    error = %e,
                    "Failed to mark equipment scrapped"
                );
            }
        }
        _ => {}
    }
}

/// Compute and persist the next occurrence for a recurring request
async fn schedule_next_occurrence<S: SideEffectWrites>(store: &S, request: &MaintenanceRequest) {
    if !request.is_recurring || request.schedule_type == ScheduleType::OneTime {
        return;
    }
    let base = request.scheduled_date.unwrap_or_else(Utc::now);
    let next = recurrence::next_occurrence(base, request.schedule_type);

    if let Err(e) = store.set_next_scheduled_date(request.id, next).await {
        tracing::warn!(
            request_id = request.id,
            error = %e,
            "Failed to persist next scheduled date"
        );
    } else {
        tracing::info!(request_id = request.id, next = ?next, "Next occurrence scheduled");
    }
}

/// Stamp last/next maintenance dates on the equipment record
async fn stamp_equipment_maintenance<S: SideEffectWrites>(store: &S, request: &MaintenanceRequest) {
    let completed = request.completed_at.unwrap_or_else(Utc::now);
    let next = if request.is_recurring && request.schedule_type != ScheduleType::OneTime {
        let base = request.scheduled_date.unwrap_or(completed);
        recurrence::next_occurrence(base, request.schedule_type)
    } else {
        None
    };

    if let Err(e) = store
        .set_equipment_maintenance_dates(request.equipment_id, completed, next)
        .await
    {
        tracing::warn!(
            request_id = request.id,
            equipment_id = request.equipment_id,
            error = %e,
            "Failed to stamp equipment maintenance dates"
        );
    }
}

fn log_action_for(target: RequestStatus) -> LogAction {
    match target {
        RequestStatus::Assigned => LogAction::Assigned,
        RequestStatus::InProgress => LogAction::Started,
        RequestStatus::Completed => LogAction::Completed,
        _ => LogAction::StatusChanged,
    }
}
