//! Maintenance request model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::enums::{Priority, RequestStatus, RequestType, ScheduleType};

/// A spare part consumed by a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PartUsed {
    pub name: String,
    /// Defaults to 1 when omitted
    pub quantity: Option<i32>,
    /// Unit cost, defaults to 0 when omitted
    pub cost: Option<Decimal>,
}

/// An append-only note on a request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestNote {
    pub content: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Derived total over the parts list: sum of cost times quantity, with a
/// missing cost counting as zero and a missing quantity as one.
pub fn compute_total_cost(parts: &[PartUsed]) -> Decimal {
    parts
        .iter()
        .map(|p| {
            let cost = p.cost.unwrap_or(Decimal::ZERO);
            let quantity = Decimal::from(p.quantity.unwrap_or(1));
            cost * quantity
        })
        .sum()
}

/// Maintenance request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: String,
    pub description: String,
    pub request_type: RequestType,
    pub priority: Priority,
    pub status: RequestStatus,
    pub equipment_id: i32,
    pub team_id: i32,
    pub technician_id: Option<i32>,
    pub created_by: i32,
    pub completed_by: Option<i32>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub next_scheduled_date: Option<DateTime<Utc>>,
    pub schedule_type: ScheduleType,
    pub is_recurring: bool,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    #[schema(value_type = Vec<PartUsed>)]
    pub parts_used: Json<Vec<PartUsed>>,
    pub total_cost: Decimal,
    #[schema(value_type = Vec<RequestNote>)]
    pub notes: Json<Vec<RequestNote>>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MaintenanceRequest {
    /// Overdue is computed on read, never stored
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status.is_open()
            && self.scheduled_date.map(|d| d < now).unwrap_or(false)
    }
}

/// Request with denormalized read-side fields
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub is_overdue: bool,
}

impl From<MaintenanceRequest> for RequestDetails {
    fn from(request: MaintenanceRequest) -> Self {
        let is_overdue = request.is_overdue(Utc::now());
        Self { request, is_overdue }
    }
}

/// Create request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequest {
    pub subject: String,
    pub description: String,
    pub request_type: RequestType,
    pub priority: Option<Priority>,
    pub equipment_id: i32,
    pub team_id: i32,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub schedule_type: Option<ScheduleType>,
    pub is_recurring: Option<bool>,
    pub estimated_hours: Option<Decimal>,
}

/// Status transition body
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRequest {
    pub status: RequestStatus,
    pub note: Option<String>,
    pub actual_hours: Option<Decimal>,
    pub parts_used: Option<Vec<PartUsed>>,
}

/// Technician assignment body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignTechnician {
    pub technician_id: i32,
}

/// Note body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddNote {
    pub content: String,
}

/// Request list filters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub priority: Option<Priority>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<i32>,
    pub team_id: Option<i32>,
    pub technician_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_sums_quantity_times_cost() {
        let parts = vec![
            PartUsed { name: "belt".into(), quantity: Some(2), cost: Some(Decimal::from(10)) },
            PartUsed { name: "bolt".into(), quantity: Some(1), cost: Some(Decimal::from(5)) },
        ];
        assert_eq!(compute_total_cost(&parts), Decimal::from(25));
    }

    #[test]
    fn total_cost_defaults_missing_fields() {
        let parts = vec![
            // no cost: contributes 0
            PartUsed { name: "washer".into(), quantity: Some(4), cost: None },
            // no quantity: treated as 1
            PartUsed { name: "filter".into(), quantity: None, cost: Some(Decimal::new(750, 2)) },
        ];
        assert_eq!(compute_total_cost(&parts), Decimal::new(750, 2));
    }

    #[test]
    fn total_cost_empty_is_zero() {
        assert_eq!(compute_total_cost(&[]), Decimal::ZERO);
    }

    #[test]
    fn overdue_only_while_open() {
        use chrono::TimeZone;
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let past = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();

        let mut req = sample_request();
        req.scheduled_date = Some(past);
        req.status = RequestStatus::InProgress;
        assert!(req.is_overdue(now));

        req.status = RequestStatus::Completed;
        assert!(!req.is_overdue(now));

        req.status = RequestStatus::Cancelled;
        assert!(!req.is_overdue(now));
    }

    fn sample_request() -> MaintenanceRequest {
        MaintenanceRequest {
            id: 1,
            subject: "Pump inspection".into(),
            description: "Quarterly inspection".into(),
            request_type: RequestType::Preventive,
            priority: Priority::Medium,
            status: RequestStatus::New,
            equipment_id: 1,
            team_id: 1,
            technician_id: None,
            created_by: 1,
            completed_by: None,
            scheduled_date: None,
            next_scheduled_date: None,
            schedule_type: ScheduleType::OneTime,
            is_recurring: false,
            estimated_hours: None,
            actual_hours: None,
            parts_used: Json(Vec::new()),
            total_cost: Decimal::ZERO,
            notes: Json(Vec::new()),
            assigned_at: None,
            started_at: None,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
