//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health, home, interventions, locations, lookups, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TrackHub API",
        version = "1.0.0",
        description = "Equipment Maintenance Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::export_equipment,
        // Interventions
        interventions::list_interventions,
        interventions::get_intervention,
        interventions::create_intervention,
        interventions::update_intervention,
        interventions::delete_intervention,
        interventions::export_interventions,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        // Lookups
        lookups::list_equipment_types,
        lookups::list_equipment_statuses,
        lookups::list_intervention_outcomes,
        // Users
        users::list_users,
        users::list_technicians,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Dashboard
        home::summary,
        home::activity,
        home::priority,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::SessionStatus,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            equipment::EquipmentWithHistory,
            // Interventions
            crate::models::intervention::Intervention,
            crate::models::intervention::InterventionDetails,
            crate::models::intervention::CreateIntervention,
            crate::models::intervention::UpdateIntervention,
            // Locations
            crate::models::location::Location,
            crate::models::location::LocationWithCount,
            crate::models::location::CreateLocation,
            crate::models::location::UpdateLocation,
            // Lookups
            crate::models::lookup::EquipmentType,
            crate::models::lookup::EquipmentStatus,
            crate::models::lookup::InterventionOutcome,
            // Users
            crate::models::user::User,
            crate::models::user::Role,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Dashboard
            home::StatEntry,
            home::DashboardKpi,
            home::DashboardSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "interventions", description = "Maintenance intervention management"),
        (name = "locations", description = "Physical location management"),
        (name = "lookups", description = "Reference data for dropdowns"),
        (name = "users", description = "User management"),
        (name = "home", description = "Dashboard data")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
