//! Equipment service

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment,
    },
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

    pub async fn search(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentDetails>, i64)> {
        self.repository.equipment.search(query).await
    }

    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        self.repository.equipment.get_details_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }

    /// Delete equipment together with its intervention history (application
    /// level cascade).
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }

    /// All matching equipment for export
    pub async fn list_for_export(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        self.repository.equipment.list_for_export(query).await
    }
}
