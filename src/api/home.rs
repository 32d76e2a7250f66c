//! Dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::equipment::EquipmentDetails,
    models::intervention::InterventionDetails,
};

use super::{AuthenticatedUser, PaginatedResponse};

/// A labelled value for chart data
#[derive(Debug, Serialize, ToSchema)]
pub struct StatEntry {
    pub label: String,
    pub value: i64,
}

/// KPI counters for the administrator dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardKpi {
    pub total_assets: i64,
    pub total_interventions: i64,
    pub total_technicians: i64,
}

/// Administrator dashboard data
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub kpi: DashboardKpi,
    pub status_distribution: Vec<StatEntry>,
    pub technician_performance: Vec<StatEntry>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Administrator dashboard summary (KPIs and chart data)
#[utoipa::path(
    get,
    path = "/home/summary",
    tag = "home",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardSummary>> {
    claims.require_admin()?;

    let summary = state.services.home.admin_summary().await?;
    Ok(Json(summary))
}

/// Recent interventions of the requesting user. The requester identity
/// comes from the authenticated claims, never from query parameters.
#[utoipa::path(
    get,
    path = "/home/activity",
    tag = "home",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Own recent interventions", body = PaginatedResponse<InterventionDetails>)
    )
)]
pub async fn activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<InterventionDetails>>> {
    let (items, total) = state
        .services
        .home
        .technician_activity(claims.user_id, query.page, query.per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(5),
    }))
}

/// Equipment requiring attention (status Obsolete), paginated
#[utoipa::path(
    get,
    path = "/home/priority",
    tag = "home",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Priority equipment list", body = PaginatedResponse<EquipmentDetails>)
    )
)]
pub async fn priority(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<EquipmentDetails>>> {
    let (items, total) = state
        .services
        .home
        .priority_list(query.page, query.per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(5),
    }))
}
