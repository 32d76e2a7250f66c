//! Intervention management service, including the synchronization of
//! equipment status with intervention outcomes.

use chrono::{NaiveDate, Utc};

use crate::{
    error::AppResult,
    models::intervention::{
        CreateIntervention, Intervention, InterventionDetails, InterventionQuery,
        UpdateIntervention,
    },
    repository::{interventions::InterventionRecord, Repository},
    rules,
};

#[derive(Clone)]
pub struct InterventionsService {
    repository: Repository,
}

impl InterventionsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Parse a YYYY-MM-DD date string, defaulting to today when absent or
    /// unparsable.
    fn parse_date(value: Option<&str>) -> NaiveDate {
        value
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Synchronize an equipment's status with an intervention outcome.
    ///
    /// Unknown equipment ids are absorbed silently: update operations in
    /// this system report "not found" rather than raising, and a missing
    /// equipment here means it was removed between the intervention write
    /// and the status write.
    pub async fn apply_outcome(&self, equipment_id: i32, outcome_id: i32) -> AppResult<()> {
        let Some(status) = rules::status_for_outcome(outcome_id) else {
            return Ok(());
        };

        let updated = self
            .repository
            .equipment
            .set_status(equipment_id, status as i32)
            .await?;

        if !updated {
            tracing::debug!(
                equipment_id,
                outcome_id,
                "status synchronization skipped: equipment not found"
            );
        }
        Ok(())
    }

    /// Create a new intervention and synchronize the equipment status with
    /// its outcome.
    pub async fn create(&self, data: CreateIntervention) -> AppResult<Intervention> {
        let record = InterventionRecord {
            date: Self::parse_date(data.date.as_deref()),
            description: data.description,
            duration_minutes: data.duration_minutes.unwrap_or(0),
            equipment_id: data.equipment_id,
            user_id: data.technician_id,
            outcome_id: data.outcome_id,
        };

        let intervention = self.repository.interventions.create(&record).await?;

        if let Some(outcome_id) = intervention.outcome_id {
            self.apply_outcome(intervention.equipment_id, outcome_id)
                .await?;
        }

        Ok(intervention)
    }

    /// Update an intervention and re-synchronize the equipment status.
    ///
    /// The effective outcome is the new value if the update carries one,
    /// otherwise the previously stored value: moving an intervention to a
    /// different equipment re-applies its stored outcome to the new
    /// equipment.
    pub async fn update(&self, id: i32, data: UpdateIntervention) -> AppResult<Intervention> {
        let existing = self.repository.interventions.get_by_id(id).await?;

        let record = InterventionRecord {
            date: match data.date.as_deref() {
                // Keep the stored date when the new value does not parse
                Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or(existing.date),
                None => existing.date,
            },
            description: data.description.unwrap_or(existing.description),
            duration_minutes: data.duration_minutes.unwrap_or(existing.duration_minutes),
            equipment_id: data.equipment_id.unwrap_or(existing.equipment_id),
            user_id: data.technician_id.or(existing.user_id),
            outcome_id: data.outcome_id.or(existing.outcome_id),
        };

        let updated = self.repository.interventions.update(id, &record).await?;

        if let Some(outcome_id) = updated.outcome_id {
            self.apply_outcome(updated.equipment_id, outcome_id).await?;
        }

        Ok(updated)
    }

    /// Delete an intervention
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.interventions.delete(id).await
    }

    /// Get intervention with flattened related names
    pub async fn get_details(&self, id: i32) -> AppResult<InterventionDetails> {
        self.repository.interventions.get_details_by_id(id).await
    }

    /// Search interventions with pagination
    pub async fn search(
        &self,
        query: &InterventionQuery,
    ) -> AppResult<(Vec<InterventionDetails>, i64)> {
        self.repository.interventions.search(query).await
    }

    /// All matching interventions for export
    pub async fn list_for_export(
        &self,
        query: &InterventionQuery,
    ) -> AppResult<Vec<InterventionDetails>> {
        self.repository.interventions.list_for_export(query).await
    }

    /// Intervention history for one equipment
    pub async fn list_by_equipment(&self, equipment_id: i32) -> AppResult<Vec<InterventionDetails>> {
        self.repository.interventions.list_by_equipment(equipment_id).await
    }
}
