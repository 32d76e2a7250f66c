//! Lookup table service

use crate::{
    error::AppResult,
    models::lookup::{EquipmentStatus, EquipmentType, InterventionOutcome},
    repository::Repository,
};

#[derive(Clone)]
pub struct LookupsService {
    repository: Repository,
}

impl LookupsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        self.repository.lookups.list_types().await
    }

    pub async fn list_statuses(&self) -> AppResult<Vec<EquipmentStatus>> {
        self.repository.lookups.list_statuses().await
    }

    pub async fn list_outcomes(&self) -> AppResult<Vec<InterventionOutcome>> {
        self.repository.lookups.list_outcomes().await
    }
}
