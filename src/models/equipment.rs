//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub type_id: i32,
    /// Current operational status. Mutated only by the intervention outcome
    /// synchronization or an explicit edit.
    pub status_id: i32,
    pub location_id: Option<i32>,
}

/// Equipment with related descriptions flattened in, for list views and export
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentDetails {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub type_id: i32,
    pub status_id: i32,
    pub location_id: Option<i32>,
    pub type_description: Option<String>,
    pub status_description: Option<String>,
    pub location_name: Option<String>,
}

/// Equipment query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Search term matched against name and description
    pub search: Option<String>,
    /// Filter by status ID
    pub status: Option<i32>,
    /// Filter by location ID
    pub location: Option<i32>,
    /// Filter by type ID
    #[serde(rename = "type")]
    pub equipment_type: Option<i32>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub type_id: i32,
    pub status_id: i32,
    pub location_id: Option<i32>,
}

/// Update equipment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<i32>,
    pub status_id: Option<i32>,
    pub location_id: Option<i32>,
}
