//! Dashboard aggregation service

use sqlx::Row;

use crate::{
    api::home::{DashboardKpi, DashboardSummary, StatEntry},
    error::AppResult,
    models::equipment::{EquipmentDetails, EquipmentQuery},
    models::intervention::{InterventionDetails, InterventionQuery},
    repository::Repository,
    rules::EquipmentStatusId,
};

#[derive(Clone)]
pub struct HomeService {
    repository: Repository,
}

impl HomeService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// KPIs and chart data for the administrator dashboard
    pub async fn admin_summary(&self) -> AppResult<DashboardSummary> {
        let pool = &self.repository.pool;

        let total_assets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(pool)
            .await?;
        let total_interventions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interventions")
            .fetch_one(pool)
            .await?;
        let total_technicians: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'technician'")
                .fetch_one(pool)
                .await?;

        // Equipment status distribution (pie chart)
        let status_distribution = sqlx::query(
            r#"
            SELECT s.description AS label, COUNT(e.id) AS value
            FROM equipment_statuses s
            JOIN equipment e ON e.status_id = s.id
            GROUP BY s.description
            ORDER BY value DESC
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        // Interventions per technician, top 5 (bar chart)
        let technician_performance = sqlx::query(
            r#"
            SELECT u.last_name AS label, COUNT(i.id) AS value
            FROM users u
            JOIN interventions i ON i.user_id = u.id
            WHERE u.role = 'technician'
            GROUP BY u.id, u.last_name
            ORDER BY value DESC
            LIMIT 5
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        Ok(DashboardSummary {
            kpi: DashboardKpi {
                total_assets,
                total_interventions,
                total_technicians,
            },
            status_distribution,
            technician_performance,
        })
    }

    /// Recent interventions of the requesting technician, paginated
    pub async fn technician_activity(
        &self,
        user_id: i32,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<InterventionDetails>, i64)> {
        let query = InterventionQuery {
            search: None,
            technician: Some(user_id),
            equipment: None,
            outcome: None,
            date: None,
            page,
            per_page,
        };
        self.repository.interventions.search(&query).await
    }

    /// Equipment requiring attention (status Obsolete), paginated. The
    /// status id is encapsulated here rather than supplied by the frontend.
    pub async fn priority_list(
        &self,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> AppResult<(Vec<EquipmentDetails>, i64)> {
        let query = EquipmentQuery {
            search: None,
            status: Some(EquipmentStatusId::Obsolete as i32),
            location: None,
            equipment_type: None,
            page,
            per_page,
        };
        self.repository.equipment.search(&query).await
    }
}
