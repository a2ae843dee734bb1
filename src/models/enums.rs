//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a maintenance request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    Scrap,
}

impl RequestStatus {
    /// Legal forward transitions. Terminal states return an empty slice,
    /// self-loops are never legal.
    pub fn transitions(&self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::New => &[RequestStatus::Assigned, RequestStatus::Cancelled],
            RequestStatus::Assigned => &[RequestStatus::InProgress, RequestStatus::Cancelled],
            RequestStatus::InProgress => &[RequestStatus::Completed, RequestStatus::Cancelled],
            RequestStatus::Completed => &[RequestStatus::Scrap],
            RequestStatus::Cancelled => &[],
            RequestStatus::Scrap => &[],
        }
    }

    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        self.transitions().contains(&target)
    }

    pub fn is_terminal(&self) -> bool {
        self.transitions().is_empty()
    }

    /// Whether the request is still open (counts toward overdue checks)
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            RequestStatus::New | RequestStatus::Assigned | RequestStatus::InProgress
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RequestStatus::New => "new",
            RequestStatus::Assigned => "assigned",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
            RequestStatus::Scrap => "scrap",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

/// Kind of maintenance work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Request priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ScheduleType
// ---------------------------------------------------------------------------

/// Repeat pattern for recurring requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "schedule_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    OneTime,
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Default for ScheduleType {
    fn default() -> Self {
        ScheduleType::OneTime
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "equipment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Inactive,
    UnderMaintenance,
    Scrapped,
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Inactive => "inactive",
            EquipmentStatus::UnderMaintenance => "under_maintenance",
            EquipmentStatus::Scrapped => "scrapped",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// User role; capability checks live in `Role::can`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Manager,
    Technician,
    Requester,
}

/// Operations gated by the capability policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadRequests,
    WriteRequests,
    TransitionRequests,
    AssignTechnician,
    DeleteRequests,
    ManageEquipment,
    ManageTeams,
    ManageUsers,
    ViewStats,
}

impl Role {
    /// Single capability table replacing inline role-string comparisons
    pub fn can(&self, action: Action) -> bool {
        use Action::*;
        match self {
            Role::Admin => true,
            Role::Manager => !matches!(action, ManageUsers | DeleteRequests),
            Role::Technician => matches!(
                action,
                ReadRequests | WriteRequests | TransitionRequests | ViewStats
            ),
            Role::Requester => matches!(action, ReadRequests | WriteRequests),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Technician => "technician",
            Role::Requester => "requester",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// LogAction
// ---------------------------------------------------------------------------

/// Kind of audit log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "log_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    Created,
    Assigned,
    Started,
    Completed,
    StatusChanged,
    NoteAdded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    const ALL: [RequestStatus; 6] = [New, Assigned, InProgress, Completed, Cancelled, Scrap];

    #[test]
    fn legal_edges() {
        assert!(New.can_transition_to(Assigned));
        assert!(New.can_transition_to(Cancelled));
        assert!(Assigned.can_transition_to(InProgress));
        assert!(Assigned.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(Completed.can_transition_to(Scrap));
    }

    #[test]
    fn self_loops_are_illegal() {
        for s in ALL {
            assert!(!s.can_transition_to(s), "{} must not loop onto itself", s);
        }
    }

    #[test]
    fn terminal_states_have_no_exits() {
        assert!(Cancelled.is_terminal());
        assert!(Scrap.is_terminal());
        for s in ALL {
            if s.is_terminal() {
                for t in ALL {
                    assert!(!s.can_transition_to(t));
                }
            }
        }
    }

    #[test]
    fn no_shortcut_edges() {
        assert!(!New.can_transition_to(Completed));
        assert!(!New.can_transition_to(InProgress));
        assert!(!New.can_transition_to(Scrap));
        assert!(!Assigned.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Scrap));
        assert!(!Completed.can_transition_to(New));
        assert!(!Cancelled.can_transition_to(New));
    }

    #[test]
    fn capability_table() {
        assert!(Role::Admin.can(Action::ManageUsers));
        assert!(!Role::Manager.can(Action::ManageUsers));
        assert!(Role::Manager.can(Action::AssignTechnician));
        assert!(Role::Technician.can(Action::TransitionRequests));
        assert!(!Role::Technician.can(Action::ManageEquipment));
        assert!(Role::Requester.can(Action::WriteRequests));
        assert!(!Role::Requester.can(Action::TransitionRequests));
    }
}
