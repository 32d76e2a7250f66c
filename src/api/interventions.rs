//! Intervention API endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::intervention::{
        CreateIntervention, Intervention, InterventionDetails, InterventionQuery,
        UpdateIntervention,
    },
    services::export::ExportService,
};

use super::PaginatedResponse;

/// List interventions with search and pagination, newest first
#[utoipa::path(
    get,
    path = "/interventions",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(InterventionQuery),
    responses(
        (status = 200, description = "Intervention list", body = PaginatedResponse<InterventionDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_interventions(
    State(state): State<crate::AppState>,
    Query(query): Query<InterventionQuery>,
) -> AppResult<Json<PaginatedResponse<InterventionDetails>>> {
    let (items, total) = state.services.interventions.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(5),
    }))
}

/// Get intervention by ID
#[utoipa::path(
    get,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    responses(
        (status = 200, description = "Intervention details", body = InterventionDetails),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn get_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<InterventionDetails>> {
    let intervention = state.services.interventions.get_details(id).await?;
    Ok(Json(intervention))
}

/// Create an intervention. The equipment status is synchronized with the
/// outcome as a side effect.
#[utoipa::path(
    post,
    path = "/interventions",
    tag = "interventions",
    security(("bearer_auth" = [])),
    request_body = CreateIntervention,
    responses(
        (status = 201, description = "Intervention created", body = Intervention),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_intervention(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateIntervention>,
) -> AppResult<(StatusCode, Json<Intervention>)> {
    data.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let intervention = state.services.interventions.create(data).await?;
    Ok((StatusCode::CREATED, Json(intervention)))
}

/// Update an intervention. The equipment status is re-synchronized with the
/// effective outcome as a side effect.
#[utoipa::path(
    put,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    request_body = UpdateIntervention,
    responses(
        (status = 200, description = "Intervention updated", body = Intervention),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn update_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateIntervention>,
) -> AppResult<Json<Intervention>> {
    let intervention = state.services.interventions.update(id, data).await?;
    Ok(Json(intervention))
}

/// Delete an intervention
#[utoipa::path(
    delete,
    path = "/interventions/{id}",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Intervention ID")),
    responses(
        (status = 204, description = "Intervention deleted"),
        (status = 404, description = "Intervention not found")
    )
)]
pub async fn delete_intervention(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.interventions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the filtered intervention list as a spreadsheet
#[utoipa::path(
    get,
    path = "/interventions/export",
    tag = "interventions",
    security(("bearer_auth" = [])),
    params(InterventionQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv")
    )
)]
pub async fn export_interventions(
    State(state): State<crate::AppState>,
    Query(query): Query<InterventionQuery>,
) -> AppResult<impl IntoResponse> {
    let items = state.services.interventions.list_for_export(&query).await?;

    let headers = [
        "ID",
        "Date",
        "Description",
        "Equipment",
        "Technician",
        "Outcome",
        "Duration (min)",
    ];
    let rows: Vec<Vec<String>> = items
        .into_iter()
        .map(|item| {
            vec![
                item.id.to_string(),
                item.date.to_string(),
                item.description,
                item.equipment_name.unwrap_or_else(|| "N/A".to_string()),
                item.technician_name.unwrap_or_else(|| "N/A".to_string()),
                item.outcome_description.unwrap_or_else(|| "Pending".to_string()),
                item.duration_minutes.to_string(),
            ]
        })
        .collect();

    let bytes = ExportService::to_csv(&headers, &rows)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"interventions_export.csv\"",
            ),
        ],
        bytes,
    ))
}
