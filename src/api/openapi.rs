//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{affectation, auth, disponibility, engines, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fleet Console API",
        version = "1.0.0",
        description = "Engine availability and assignment REST API"
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::me,
        // Engines
        engines::list_engines,
        engines::get_engine,
        engines::create_engine,
        engines::update_engine,
        engines::delete_engine,
        engines::bulk_create,
        engines::bulk_update,
        engines::bulk_delete,
        engines::engine_stats,
        // Disponibility
        disponibility::list,
        disponibility::mark_available,
        disponibility::mark_unavailable,
        disponibility::move_engine,
        // Affectation
        affectation::list,
        affectation::stats,
        affectation::assign,
        affectation::unassign,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::Role,
            crate::models::user::UserInfo,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            // Engines
            crate::models::engine::EngineRecord,
            crate::models::engine::EngineDraft,
            crate::models::engine::EngineMetadata,
            crate::models::enums::EngineType,
            crate::models::enums::Availability,
            crate::models::listing::EngineList,
            crate::models::bulk::BulkCreateRequest,
            crate::models::bulk::BulkUpdateRequest,
            crate::models::bulk::BulkDeleteRequest,
            crate::models::bulk::BulkRowError,
            crate::models::bulk::BulkCreateResponse,
            crate::models::bulk::BulkUpdateResponse,
            crate::models::bulk::BulkDeleteResponse,
            // Moves
            crate::models::movement::EngineRef,
            crate::models::movement::MarkUnavailable,
            crate::models::movement::MoveRequest,
            crate::models::movement::AssignRequest,
            crate::models::listing::DisponibilityListing,
            crate::models::listing::AffectationListing,
            crate::console::partition::Side,
            // Stats
            crate::console::stats::FleetStats,
            crate::console::stats::TypeBreakdown,
            crate::console::stats::DemandeurCount,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "engines", description = "Engine catalog management"),
        (name = "disponibility", description = "Engine availability"),
        (name = "affectation", description = "Engine assignment")
    )
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

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
