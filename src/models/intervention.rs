//! Intervention (maintenance log) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Intervention record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Intervention {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
    pub duration_minutes: i32,
    pub equipment_id: i32,
    /// Technician who performed the work
    pub user_id: Option<i32>,
    pub outcome_id: Option<i32>,
}

/// Intervention with related names flattened in, for list views and export
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InterventionDetails {
    pub id: i32,
    pub date: NaiveDate,
    pub description: String,
    pub duration_minutes: i32,
    pub equipment_id: i32,
    pub user_id: Option<i32>,
    pub outcome_id: Option<i32>,
    pub equipment_name: Option<String>,
    pub technician_name: Option<String>,
    pub outcome_description: Option<String>,
}

/// Intervention query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct InterventionQuery {
    /// Search term matched against the description
    pub search: Option<String>,
    /// Filter by technician (user) ID
    pub technician: Option<i32>,
    /// Filter by equipment ID
    pub equipment: Option<i32>,
    /// Filter by outcome ID
    pub outcome: Option<i32>,
    /// Filter by exact date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create intervention request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIntervention {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Intervention date (YYYY-MM-DD). Defaults to today when absent or
    /// unparsable.
    pub date: Option<String>,
    pub duration_minutes: Option<i32>,
    pub technician_id: Option<i32>,
    pub equipment_id: i32,
    pub outcome_id: Option<i32>,
}

/// Update intervention request (partial)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateIntervention {
    pub description: Option<String>,
    pub date: Option<String>,
    pub duration_minutes: Option<i32>,
    pub technician_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub outcome_id: Option<i32>,
}
