//! Dashboard statistics service
//!
//! Direct GROUP BY passthroughs; nothing here is authoritative state.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Request-side dashboard numbers
#[derive(Debug, Serialize, ToSchema)]
pub struct RequestStats {
    pub by_status: HashMap<String, i64>,
    pub open_by_priority: HashMap<String, i64>,
    pub overdue: i64,
    pub recurring: i64,
}

/// Equipment-side dashboard numbers
#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentStats {
    pub by_status: HashMap<String, i64>,
}

/// Open request count for one team
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamOpenCount {
    pub team_id: i32,
    pub open_requests: i64,
}

/// Full dashboard payload
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub requests: RequestStats,
    pub equipment: EquipmentStats,
    pub teams: Vec<TeamOpenCount>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather all dashboard numbers
    pub async fn dashboard(&self) -> AppResult<StatsResponse> {
        let by_status = self
            .repository
            .requests
            .count_by_status()
            .await?
            .into_iter()
            .map(|(s, n)| (s.to_string(), n))
            .collect();

        let open_by_priority = self
            .repository
            .requests
            .count_open_by_priority()
            .await?
            .into_iter()
            .map(|(p, n)| (p.to_string(), n))
            .collect();

        let overdue = self.repository.requests.count_overdue().await?;
        let recurring = self.repository.requests.count_recurring().await?;

        let equipment_by_status = self
            .repository
            .equipment
            .count_by_status()
            .await?
            .into_iter()
            .map(|(s, n)| (s.to_string(), n))
            .collect();

        let teams = self
            .repository
            .requests
            .count_open_by_team()
            .await?
            .into_iter()
            .map(|(team_id, open_requests)| TeamOpenCount { team_id, open_requests })
            .collect();

        Ok(StatsResponse {
            requests: RequestStats {
                by_status,
                open_by_priority,
                overdue,
                recurring,
            },
            equipment: EquipmentStats {
                by_status: equipment_by_status,
            },
            teams,
        })
    }
}
