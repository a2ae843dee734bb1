//! Equipment registry service

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    /// Get equipment by ID
    pub async fn get(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        if data.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        if let Some(team_id) = data.assigned_team_id {
            self.repository.teams.get_by_id(team_id).await?;
        }
        self.repository.equipment.create(data).await
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        if let Some(team_id) = data.assigned_team_id {
            self.repository.teams.get_by_id(team_id).await?;
        }
        self.repository.equipment.update(id, data).await
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
