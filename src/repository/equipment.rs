//! Equipment repository for database operations

use sqlx::{Pool, Postgres};

use super::map_fk_violation;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetails, EquipmentQuery, UpdateEquipment,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT e.id, e.name, e.description, e.type_id, e.status_id, e.location_id,
           t.description AS type_description,
           s.description AS status_description,
           l.name AS location_name
    FROM equipment e
    LEFT JOIN equipment_types t ON e.type_id = t.id
    LEFT JOIN equipment_statuses s ON e.status_id = s.id
    LEFT JOIN locations l ON e.location_id = l.id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn filter_conditions(query: &EquipmentQuery, params: &mut Vec<String>) -> Vec<String> {
        let mut conditions = Vec::new();

        if let Some(ref search) = query.search {
            if !search.is_empty() {
                params.push(format!("%{}%", search));
                conditions.push(format!(
                    "(e.name ILIKE ${n} OR e.description ILIKE ${n})",
                    n = params.len()
                ));
            }
        }
        if let Some(status_id) = query.status {
            conditions.push(format!("e.status_id = {}", status_id));
        }
        if let Some(location_id) = query.location {
            conditions.push(format!("e.location_id = {}", location_id));
        }
        if let Some(type_id) = query.equipment_type {
            conditions.push(format!("e.type_id = {}", type_id));
        }

        conditions
    }

    /// Search equipment with pagination, returning flattened details rows
    pub async fn search(&self, query: &EquipmentQuery) -> AppResult<(Vec<EquipmentDetails>, i64)> {
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

        let count_query = format!("SELECT COUNT(*) FROM equipment e {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        for param in &params {
            count_builder = count_builder.bind(param);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_query = format!(
            "{} {} ORDER BY e.name LIMIT {} OFFSET {}",
            DETAILS_SELECT, where_clause, per_page, offset
        );
        let mut select_builder = sqlx::query_as::<_, EquipmentDetails>(&select_query);
        for param in &params {
            select_builder = select_builder.bind(param);
        }
        let items = select_builder.fetch_all(&self.pool).await?;

        Ok((items, total))
    }

    /// All matching equipment (non-paginated), for file export
    pub async fn list_for_export(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentDetails>> {
        let mut params: Vec<String> = Vec::new();
        let conditions = Self::filter_conditions(query, &mut params);

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!("{} {} ORDER BY e.name", DETAILS_SELECT, where_clause);
        let mut builder = sqlx::query_as::<_, EquipmentDetails>(&select_query);
        for param in &params {
            builder = builder.bind(param);
        }
        let items = builder.fetch_all(&self.pool).await?;

        Ok(items)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment with flattened related descriptions
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<EquipmentDetails> {
        let query = format!("{} WHERE e.id = $1", DETAILS_SELECT);
        sqlx::query_as::<_, EquipmentDetails>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, description, type_id, status_id, location_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.type_id)
        .bind(data.status_id)
        .bind(data.location_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, "Unknown type, status or location id"))?;
        Ok(row)
    }

    /// Update equipment
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.description, "description");
        add_field!(data.type_id, "type_id");
        add_field!(data.status_id, "status_id");
        add_field!(data.location_id, "location_id");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.type_id);
        bind_field!(data.status_id);
        bind_field!(data.location_id);

        builder
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_fk_violation(e, "Unknown type, status or location id"))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment, cascading to its interventions in application code.
    /// Both deletions run in one transaction so no orphaned intervention can
    /// be observed.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM interventions WHERE equipment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Set the operational status of an equipment. Returns false when the
    /// equipment does not exist; callers decide whether that matters.
    pub async fn set_status(&self, id: i32, status_id: i32) -> AppResult<bool> {
        let result = sqlx::query("UPDATE equipment SET status_id = $1 WHERE id = $2")
            .bind(status_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
