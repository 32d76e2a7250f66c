//! Location model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Physical location where equipment can be stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub department: Option<String>,
}

/// Location with its equipment count, for the locations dashboard
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LocationWithCount {
    pub id: i32,
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub department: Option<String>,
    pub item_count: i64,
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    #[validate(length(min = 1, message = "Location name is required"))]
    pub name: String,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub department: Option<String>,
}

/// Update location request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub building: Option<String>,
    pub floor: Option<String>,
    pub department: Option<String>,
}
