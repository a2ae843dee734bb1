//! Calendar projection: day-bucketed view of scheduled requests
//!
//! Display color and kind are derived purely from stored fields on every
//! call; nothing here is authoritative state.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        enums::{Priority, RequestStatus, RequestType},
        request::MaintenanceRequest,
    },
    repository::Repository,
};

/// One calendar entry for a scheduled request
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarEntry {
    pub request_id: i32,
    pub subject: String,
    pub scheduled_date: DateTime<Utc>,
    pub request_type: RequestType,
    pub priority: Priority,
    pub status: RequestStatus,
    pub is_overdue: bool,
    /// Display color derived from type/priority/status
    pub color: String,
}

/// All entries for one day
#[derive(Debug, Serialize, ToSchema)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub entries: Vec<CalendarEntry>,
}

/// Derive the display color. Terminal/finished states override the priority
/// palette, overdue overrides everything still open.
pub fn display_color(status: RequestStatus, priority: Priority, is_overdue: bool) -> &'static str {
    match status {
        RequestStatus::Completed => "#9e9e9e",
        RequestStatus::Cancelled | RequestStatus::Scrap => "#bdbdbd",
        _ if is_overdue => "#e53935",
        _ => match priority {
            Priority::Critical => "#ff5722",
            Priority::High => "#fb8c00",
            Priority::Medium => "#1e88e5",
            Priority::Low => "#43a047",
        },
    }
}

#[derive(Clone)]
pub struct CalendarService {
    repository: Repository,
}

impl CalendarService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Day-bucketed view of requests scheduled within [start, end]
    pub async fn range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        equipment_id: Option<i32>,
        team_id: Option<i32>,
        technician_id: Option<i32>,
    ) -> AppResult<Vec<CalendarDay>> {
        let requests = self
            .repository
            .requests
            .list_scheduled_in_range(start, end, equipment_id, team_id, technician_id)
            .await?;

        let now = Utc::now();
        let mut buckets: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
        for request in requests {
            let entry = to_entry(&request, now);
            let day = entry.scheduled_date.date_naive();
            buckets.entry(day).or_default().push(entry);
        }

        Ok(buckets
            .into_iter()
            .map(|(date, entries)| CalendarDay { date, entries })
            .collect())
    }
}

fn to_entry(request: &MaintenanceRequest, now: DateTime<Utc>) -> CalendarEntry {
    let is_overdue = request.is_overdue(now);
    CalendarEntry {
        request_id: request.id,
        subject: request.subject.clone(),
        // list_scheduled_in_range only returns rows with a scheduled date
        scheduled_date: request.scheduled_date.unwrap_or(request.created_at),
        request_type: request.request_type,
        priority: request.priority,
        status: request.status,
        is_overdue,
        color: display_color(request.status, request.priority, is_overdue).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_overrides_priority() {
        assert_eq!(
            display_color(RequestStatus::Completed, Priority::Critical, false),
            "#9e9e9e"
        );
        // even when the scheduled date is long past
        assert_eq!(
            display_color(RequestStatus::Completed, Priority::Critical, true),
            "#9e9e9e"
        );
    }

    #[test]
    fn overdue_overrides_open_priorities() {
        assert_eq!(
            display_color(RequestStatus::InProgress, Priority::Low, true),
            "#e53935"
        );
        assert_eq!(
            display_color(RequestStatus::New, Priority::Critical, true),
            "#e53935"
        );
    }

    #[test]
    fn open_requests_use_priority_palette() {
        assert_eq!(display_color(RequestStatus::New, Priority::Critical, false), "#ff5722");
        assert_eq!(display_color(RequestStatus::Assigned, Priority::High, false), "#fb8c00");
        assert_eq!(display_color(RequestStatus::New, Priority::Medium, false), "#1e88e5");
        assert_eq!(display_color(RequestStatus::InProgress, Priority::Low, false), "#43a047");
    }

    #[test]
    fn cancelled_and_scrap_are_muted() {
        assert_eq!(display_color(RequestStatus::Cancelled, Priority::High, false), "#bdbdbd");
        assert_eq!(display_color(RequestStatus::Scrap, Priority::Low, false), "#bdbdbd");
    }
}
