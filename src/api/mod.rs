//! API handlers for TrackHub REST endpoints

pub mod auth;
pub mod equipment;
pub mod health;
pub mod home;
pub mod interventions;
pub mod locations;
pub mod lookups;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::UserClaims, policy, AppState};

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = policy::claims_from_headers(&parts.headers, &state.config.auth.jwt_secret)?;
        Ok(AuthenticatedUser(claims))
    }
}

/// Extractor for an optional authenticated user. Used by the session status
/// endpoint, where being unauthenticated is a valid state, not an error.
pub struct OptionalUser(pub Option<UserClaims>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let claims = policy::claims_from_headers(&parts.headers, &state.config.auth.jwt_secret).ok();
        Ok(OptionalUser(claims))
    }
}
