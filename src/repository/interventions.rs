//! Interventions repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use super::map_fk_violation;
use crate::{
    error::{AppError, AppResult},
    models::intervention::{Intervention, InterventionDetails, InterventionQuery},
};

const DETAILS_SELECT: &str = r#"
    SELECT i.id, i.date, i.description, i.duration_minutes,
           i.equipment_id, i.user_id, i.outcome_id,
           e.name AS equipment_name,
           u.first_name || ' ' || u.last_name AS technician_name,
           o.description AS outcome_description
    FROM interventions i
    LEFT JOIN equipment e ON i.equipment_id = e.id
    LEFT JOIN users u ON i.user_id = u.id
    LEFT JOIN intervention_outcomes o ON i.outcome_id = o.id
"#;

/// Field values for an insert or update; the service layer resolves partial
/// updates and date parsing before handing the record here.
pub struct InterventionRecord {
    pub date: NaiveDate,
    pub description: String,
    pub duration_minutes: i32,
    pub equipment_id: i32,
    pub user_id: Option<i32>,
    pub outcome_id: Option<i32>,
}

#[derive(Clone)]
pub struct InterventionsRepository {
    pool: Pool<Postgres>,
}

impl InterventionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn filter_conditions(query: &InterventionQuery, params: &mut Vec<String>) -> Vec<String> {
        let mut conditions = Vec::new();

        if let Some(ref search) = query.search {
            if !search.is_empty() {
                params.push(format!("%{}%", search));
                conditions.push(format!("i.description ILIKE ${}", params.len()));
            }
        }
        if let Some(user_id) = query.technician {
            conditions.push(format!("i.user_id = {}", user_id));
        }
        if let Some(equipment_id) = query.equipment {
            conditions.push(format!("i.equipment_id = {}", equipment_id));
        }
        if let Some(outcome_id) = query.outcome {
            conditions.push(format!("i.outcome_id = {}", outcome_id));
        }
        if let Some(date) = query.date {
            conditions.push(format!("i.date = '{}'", date));
        }

        conditions
    }

    /// Search interventions with pagination, newest first
    pub async fn search(
        &self,
        query: &InterventionQuery,
    ) -> AppResult<(Vec<InterventionDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(5);
        let offset = (page - 1) * per_page;

        let mut params: Vec<String> = Vec::new();
        let conditions = Self::filter_conditions(query, &mut params);

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!("SELECT COUNT(*) FROM interventions i {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY i.date DESC, i.id DESC LIMIT {} OFFSET {}",
            DETAILS_SELECT, where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, InterventionDetails>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let items = select_builder.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    /// All matching interventions (non-paginated), for file export
    pub async fn list_for_export(
        &self,
        query: &InterventionQuery,
    ) -> AppResult<Vec<InterventionDetails>> {
        let mut params: Vec<String> = Vec::new();
        let conditions = Self::filter_conditions(query, &mut params);

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "{} {} ORDER BY i.date DESC, i.id DESC",
            DETAILS_SELECT, where_clause
        );
        let mut builder = sqlx::query_as::<_, InterventionDetails>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        let items = builder.fetch_all(&self.pool).await?;

        Ok(items)
    }

    /// Get intervention by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Intervention> {
        sqlx::query_as::<_, Intervention>("SELECT * FROM interventions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    /// Get intervention with flattened related names
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<InterventionDetails> {
        let query = format!("{} WHERE i.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, InterventionDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    /// History for one equipment, newest first
    pub async fn list_by_equipment(&self, equipment_id: i32) -> AppResult<Vec<InterventionDetails>> {
        let query = format!(
            "{} WHERE i.equipment_id = $1 ORDER BY i.date DESC, i.id DESC",
            DETAILS_SELECT
        );
        let items = sqlx::query_as::<_, InterventionDetails>(&query)
            .bind(equipment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    /// Create an intervention
    pub async fn create(&self, record: &InterventionRecord) -> AppResult<Intervention> {
        let row = sqlx::query_as::<_, Intervention>(
            r#"
            INSERT INTO interventions (date, description, duration_minutes, equipment_id, user_id, outcome_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(record.date)
        .bind(&record.description)
        .bind(record.duration_minutes)
        .bind(record.equipment_id)
        .bind(record.user_id)
        .bind(record.outcome_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, "Unknown equipment, technician or outcome id"))?;
        Ok(row)
    }

    /// Replace an intervention's fields. The service layer has already
    /// merged partial updates into a full record.
    pub async fn update(&self, id: i32, record: &InterventionRecord) -> AppResult<Intervention> {
        sqlx::query_as::<_, Intervention>(
            r#"
            UPDATE interventions
            SET date = $1, description = $2, duration_minutes = $3,
                equipment_id = $4, user_id = $5, outcome_id = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(record.date)
        .bind(&record.description)
        .bind(record.duration_minutes)
        .bind(record.equipment_id)
        .bind(record.user_id)
        .bind(record.outcome_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, "Unknown equipment, technician or outcome id"))?
        .ok_or_else(|| AppError::NotFound(format!("Intervention {} not found", id)))
    }

    /// Delete an intervention
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM interventions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Intervention {} not found", id)));
        }
        Ok(())
    }

    /// Count interventions still referencing an equipment (cascade checks)
    pub async fn count_for_equipment(&self, equipment_id: i32) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM interventions WHERE equipment_id = $1")
                .bind(equipment_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
