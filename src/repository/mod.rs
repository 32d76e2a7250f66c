//! Repository layer for database operations

pub mod equipment;
pub mod interventions;
pub mod locations;
pub mod lookups;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub interventions: interventions::InterventionsRepository,
    pub locations: locations::LocationsRepository,
    pub lookups: lookups::LookupsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            interventions: interventions::InterventionsRepository::new(pool.clone()),
            locations: locations::LocationsRepository::new(pool.clone()),
            lookups: lookups::LookupsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Map a foreign-key violation to a validation error with a readable
/// message; everything else stays a database error.
pub(crate) fn map_fk_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
            AppError::Validation(message.to_string())
        }
        _ => AppError::Database(err),
    }
}
