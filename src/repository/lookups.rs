//! Lookup table repository (equipment types, statuses, outcomes)

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::lookup::{EquipmentStatus, EquipmentType, InterventionOutcome},
};

#[derive(Clone)]
pub struct LookupsRepository {
    pool: Pool<Postgres>,
}

impl LookupsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// All equipment categories, for dropdowns
    pub async fn list_types(&self) -> AppResult<Vec<EquipmentType>> {
        let rows = sqlx::query_as::<_, EquipmentType>("SELECT * FROM equipment_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// All operational statuses, for dropdowns
    pub async fn list_statuses(&self) -> AppResult<Vec<EquipmentStatus>> {
        let rows =
            sqlx::query_as::<_, EquipmentStatus>("SELECT * FROM equipment_statuses ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    /// All intervention outcomes, for dropdowns
    pub async fn list_outcomes(&self) -> AppResult<Vec<InterventionOutcome>> {
        let rows = sqlx::query_as::<_, InterventionOutcome>(
            "SELECT * FROM intervention_outcomes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
