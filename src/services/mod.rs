//! Business logic services

pub mod calendar;
pub mod equipment;
pub mod lifecycle;
pub mod recurrence;
pub mod stats;
pub mod teams;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub equipment: equipment::EquipmentService,
    pub teams: teams::TeamsService,
    pub lifecycle: lifecycle::LifecycleService,
    pub calendar: calendar::CalendarService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            teams: teams::TeamsService::new(repository.clone()),
            lifecycle: lifecycle::LifecycleService::new(repository.clone()),
            calendar: calendar::CalendarService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
        }
    }
}
