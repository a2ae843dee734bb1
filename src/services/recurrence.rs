//! Recurrence scheduling for repeating maintenance requests

use chrono::{DateTime, Days, Months, Utc};

use crate::models::enums::ScheduleType;

/// Compute the next occurrence for a repeat pattern. Pure date arithmetic;
/// returns None for one-time schedules.
///
/// Month-based patterns keep the day-of-month and clamp when the target
/// month is shorter (Jan 31 + 1 month = Feb 28/29), matching chrono's
/// `Months` arithmetic.
pub fn next_occurrence(
    current: DateTime<Utc>,
    schedule_type: ScheduleType,
) -> Option<DateTime<Utc>> {
    match schedule_type {
        ScheduleType::OneTime => None,
        ScheduleType::Daily => current.checked_add_days(Days::new(1)),
        ScheduleType::Weekly => current.checked_add_days(Days::new(7)),
        ScheduleType::Monthly => current.checked_add_months(Months::new(1)),
        ScheduleType::Quarterly => current.checked_add_months(Months::new(3)),
        ScheduleType::Yearly => current.checked_add_months(Months::new(12)),
    }
}
