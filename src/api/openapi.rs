//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, calendar, equipment, health, requests, stats, teams, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "1.0.0",
        description = "Maintenance Request Tracking REST API",
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
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        teams::add_member,
        teams::remove_member,
        // Requests
        requests::list_requests,
        requests::get_request,
        requests::create_request,
        requests::delete_request,
        requests::transition_request,
        requests::assign_technician,
        requests::add_note,
        requests::get_request_logs,
        // Calendar
        calendar::get_calendar,
        // Stats
        stats::get_stats,
    ),
    components(schemas(
        crate::error::ErrorResponse,
        crate::models::enums::RequestStatus,
        crate::models::enums::RequestType,
        crate::models::enums::Priority,
        crate::models::enums::ScheduleType,
        crate::models::enums::EquipmentStatus,
        crate::models::enums::Role,
        crate::models::enums::LogAction,
        crate::models::user::UserPublic,
        crate::models::user::CreateUser,
        crate::models::user::UpdateUser,
        crate::models::user::LoginRequest,
        crate::models::user::LoginResponse,
        crate::models::equipment::Equipment,
        crate::models::equipment::CreateEquipment,
        crate::models::equipment::UpdateEquipment,
        crate::models::team::MaintenanceTeam,
        crate::models::team::TeamDetails,
        crate::models::team::CreateTeam,
        crate::models::team::UpdateTeam,
        crate::models::team::AddMember,
        crate::models::request::MaintenanceRequest,
        crate::models::request::RequestDetails,
        crate::models::request::CreateRequest,
        crate::models::request::TransitionRequest,
        crate::models::request::AssignTechnician,
        crate::models::request::AddNote,
        crate::models::request::PartUsed,
        crate::models::request::RequestNote,
        crate::models::log::MaintenanceLog,
        crate::services::calendar::CalendarDay,
        crate::services::calendar::CalendarEntry,
        crate::services::stats::StatsResponse,
        crate::services::stats::RequestStats,
        crate::services::stats::EquipmentStats,
        crate::services::stats::TeamOpenCount,
    )),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI router serving the generated document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
