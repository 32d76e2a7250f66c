//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::user::User};

use super::OptionalUser;

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: User,
}

/// Session status response. `user` is present only when authenticated.
#[derive(Serialize, ToSchema)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Authenticate with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (token, user) = state
        .services
        .users
        .authenticate(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// Session status check ("who am I?").
///
/// Always public and always 200: being unauthenticated is a valid answer
/// here, not an error. The frontend uses this to render the correct navbar.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Session status", body = SessionStatus)
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    OptionalUser(claims): OptionalUser,
) -> Json<SessionStatus> {
    if let Some(claims) = claims {
        // The token may outlive the account; treat a missing user as
        // unauthenticated rather than an error.
        if let Ok(user) = state.services.users.get_by_id(claims.user_id).await {
            return Json(SessionStatus {
                authenticated: true,
                user: Some(user),
            });
        }
    }

    Json(SessionStatus {
        authenticated: false,
        user: None,
    })
}
