//! Access policy: default-deny route gate and ownership checks.
//!
//! Every route carries an entry in a declarative table mapping
//! (method, route pattern) to its access level. The gate middleware consults
//! the table for the matched route before dispatch and denies anything the
//! table does not know about.

use std::collections::HashMap;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use once_cell::sync::Lazy;

use crate::{
    error::{AppError, AppResult},
    models::user::UserClaims,
    AppState,
};

/// Access level required for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No authentication required
    Public,
    /// Any authenticated user
    Authenticated,
    /// Administrator role required
    AdminOnly,
}

/// A single route policy entry: method, route pattern (as matched by the
/// router, including the `/api/v1` prefix), access level.
pub struct RoutePolicy {
    pub method: &'static str,
    pub path: &'static str,
    pub access: Access,
}

/// The route table. Routes absent from this table are denied.
pub static ROUTE_TABLE: &[RoutePolicy] = &[
    // Health
    RoutePolicy { method: "GET", path: "/api/v1/health", access: Access::Public },
    RoutePolicy { method: "GET", path: "/api/v1/ready", access: Access::Public },
    // Authentication. /auth/me is public: unauthenticated is a valid,
    // non-error response for the session status check.
    RoutePolicy { method: "POST", path: "/api/v1/auth/login", access: Access::Public },
    RoutePolicy { method: "GET", path: "/api/v1/auth/me", access: Access::Public },
    // Equipment
    RoutePolicy { method: "GET", path: "/api/v1/equipment", access: Access::Authenticated },
    RoutePolicy { method: "POST", path: "/api/v1/equipment", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/equipment/export", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/equipment/:id", access: Access::Authenticated },
    RoutePolicy { method: "PUT", path: "/api/v1/equipment/:id", access: Access::Authenticated },
    RoutePolicy { method: "DELETE", path: "/api/v1/equipment/:id", access: Access::Authenticated },
    // Interventions
    RoutePolicy { method: "GET", path: "/api/v1/interventions", access: Access::Authenticated },
    RoutePolicy { method: "POST", path: "/api/v1/interventions", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/interventions/export", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/interventions/:id", access: Access::Authenticated },
    RoutePolicy { method: "PUT", path: "/api/v1/interventions/:id", access: Access::Authenticated },
    RoutePolicy { method: "DELETE", path: "/api/v1/interventions/:id", access: Access::Authenticated },
    // Locations
    RoutePolicy { method: "GET", path: "/api/v1/locations", access: Access::Authenticated },
    RoutePolicy { method: "POST", path: "/api/v1/locations", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/locations/:id", access: Access::Authenticated },
    RoutePolicy { method: "PUT", path: "/api/v1/locations/:id", access: Access::Authenticated },
    RoutePolicy { method: "DELETE", path: "/api/v1/locations/:id", access: Access::Authenticated },
    // Lookup tables (dropdowns)
    RoutePolicy { method: "GET", path: "/api/v1/equipment-types", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/equipment-statuses", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/intervention-outcomes", access: Access::Authenticated },
    // Users. Listing and creation are restricted to administrators; single
    // user routes allow self-access, enforced in the handler via
    // `authorize_owner_or_admin`.
    RoutePolicy { method: "GET", path: "/api/v1/users", access: Access::AdminOnly },
    RoutePolicy { method: "POST", path: "/api/v1/users", access: Access::AdminOnly },
    RoutePolicy { method: "GET", path: "/api/v1/users/technicians", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/users/:id", access: Access::Authenticated },
    RoutePolicy { method: "PUT", path: "/api/v1/users/:id", access: Access::Authenticated },
    RoutePolicy { method: "DELETE", path: "/api/v1/users/:id", access: Access::Authenticated },
    // Dashboard
    RoutePolicy { method: "GET", path: "/api/v1/home/summary", access: Access::AdminOnly },
    RoutePolicy { method: "GET", path: "/api/v1/home/activity", access: Access::Authenticated },
    RoutePolicy { method: "GET", path: "/api/v1/home/priority", access: Access::Authenticated },
];

static ROUTE_INDEX: Lazy<HashMap<String, Access>> = Lazy::new(|| {
    ROUTE_TABLE
        .iter()
        .map(|p| (format!("{} {}", p.method, p.path), p.access))
        .collect()
});

/// Look up the access level for a matched route
pub fn route_access(method: &Method, path: &str) -> Option<Access> {
    ROUTE_INDEX
        .get(&format!("{} {}", method.as_str(), path))
        .copied()
}

/// Whether a route is explicitly marked public
pub fn is_route_public(method: &Method, path: &str) -> bool {
    route_access(method, path) == Some(Access::Public)
}

/// Extract and validate bearer token claims from request headers
pub fn claims_from_headers(headers: &HeaderMap, secret: &str) -> AppResult<UserClaims> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

    UserClaims::from_token(token, secret).map_err(|e| AppError::Authentication(e.to_string()))
}

/// Default-deny gate, applied to every API route after matching.
pub async fn access_gate(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let method = request.method().clone();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let access = route_access(&method, &path)
        .ok_or_else(|| AppError::Authentication("Access denied".to_string()))?;

    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let claims = claims_from_headers(request.headers(), &state.config.auth.jwt_secret)?;

    if access == Access::AdminOnly {
        claims.require_admin()?;
    }

    Ok(next.run(request).await)
}

/// A user may always act on their own record; anyone else's requires the
/// administrator role.
pub fn authorize_owner_or_admin(claims: &UserClaims, target_user_id: i32) -> AppResult<()> {
    if claims.is_admin() || claims.user_id == target_user_id {
        Ok(())
    } else {
        Err(AppError::Authorization(
            "Insufficient permissions".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn claims(user_id: i32, role: Role) -> UserClaims {
        UserClaims {
            sub: "test".to_string(),
            user_id,
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn login_and_me_are_public() {
        assert!(is_route_public(&Method::POST, "/api/v1/auth/login"));
        assert!(is_route_public(&Method::GET, "/api/v1/auth/me"));
    }

    #[test]
    fn unknown_routes_are_denied() {
        assert_eq!(route_access(&Method::GET, "/api/v1/secrets"), None);
        // Known path, wrong method
        assert_eq!(route_access(&Method::DELETE, "/api/v1/auth/login"), None);
    }

    #[test]
    fn user_management_is_admin_only() {
        assert_eq!(
            route_access(&Method::GET, "/api/v1/users"),
            Some(Access::AdminOnly)
        );
        assert_eq!(
            route_access(&Method::POST, "/api/v1/users"),
            Some(Access::AdminOnly)
        );
        assert_eq!(
            route_access(&Method::GET, "/api/v1/home/summary"),
            Some(Access::AdminOnly)
        );
    }

    #[test]
    fn owner_may_touch_own_record() {
        assert!(authorize_owner_or_admin(&claims(7, Role::Technician), 7).is_ok());
    }

    #[test]
    fn non_admin_cannot_touch_other_records() {
        let err = authorize_owner_or_admin(&claims(7, Role::Technician), 8).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn admin_may_touch_any_record() {
        assert!(authorize_owner_or_admin(&claims(1, Role::Admin), 8).is_ok());
    }
}
