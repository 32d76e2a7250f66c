//! Lookup table endpoints (dropdown data)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::lookup::{EquipmentStatus, EquipmentType, InterventionOutcome},
};

/// List equipment types
#[utoipa::path(
    get,
    path = "/equipment-types",
    tag = "lookups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment types", body = Vec<EquipmentType>)
    )
)]
pub async fn list_equipment_types(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentType>>> {
    let types = state.services.lookups.list_types().await?;
    Ok(Json(types))
}

/// List equipment statuses
#[utoipa::path(
    get,
    path = "/equipment-statuses",
    tag = "lookups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment statuses", body = Vec<EquipmentStatus>)
    )
)]
pub async fn list_equipment_statuses(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentStatus>>> {
    let statuses = state.services.lookups.list_statuses().await?;
    Ok(Json(statuses))
}

/// List intervention outcomes
#[utoipa::path(
    get,
    path = "/intervention-outcomes",
    tag = "lookups",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Intervention outcomes", body = Vec<InterventionOutcome>)
    )
)]
pub async fn list_intervention_outcomes(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<InterventionOutcome>>> {
    let outcomes = state.services.lookups.list_outcomes().await?;
    Ok(Json(outcomes))
}
