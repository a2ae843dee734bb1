//! Maintenance team service

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, MaintenanceTeam, TeamDetails, UpdateTeam},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all teams
    pub async fn list(&self) -> AppResult<Vec<MaintenanceTeam>> {
        self.repository.teams.list().await
    }

    /// Get a team with its member roster
    pub async fn get(&self, id: i32) -> AppResult<TeamDetails> {
        let team = self.repository.teams.get_by_id(id).await?;
        let members = self.repository.teams.members(id).await?;
        Ok(TeamDetails { team, members })
    }

    /// Create a team
    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if let Some(leader_id) = data.leader_id {
            self.repository.users.get_by_id(leader_id).await?;
        }
        if let Some(member_ids) = &data.member_ids {
            for user_id in member_ids {
                self.repository.users.get_by_id(*user_id).await?;
            }
        }
        self.repository.teams.create(data).await
    }

    /// Update a team
    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        if let Some(leader_id) = data.leader_id {
            self.repository.users.get_by_id(leader_id).await?;
        }
        self.repository.teams.update(id, data).await
    }

    /// Delete a team
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.teams.delete(id).await
    }

    /// Add a member to a team
    pub async fn add_member(&self, team_id: i32, user_id: i32) -> AppResult<TeamDetails> {
        self.repository.teams.get_by_id(team_id).await?;
        self.repository.users.get_by_id(user_id).await?;
        self.repository.teams.add_member(team_id, user_id).await?;
        self.get(team_id).await
    }

    /// Remove a member from a team
    pub async fn remove_member(&self, team_id: i32, user_id: i32) -> AppResult<TeamDetails> {
        self.repository.teams.get_by_id(team_id).await?;
        self.repository.teams.remove_member(team_id, user_id).await?;
        self.get(team_id).await
    }
}
