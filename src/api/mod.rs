//! REST handlers for the reference backend

pub mod affectation;
pub mod auth;
pub mod disponibility;
pub mod engines;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Build the application router with all routes under `/api`
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Engines
        .route("/engines", get(engines::list_engines).post(engines::create_engine))
        .route("/engines/stats", get(engines::engine_stats))
        .route(
            "/engines/bulk",
            post(engines::bulk_create)
                .put(engines::bulk_update)
                .delete(engines::bulk_delete),
        )
        .route(
            "/engines/:id",
            get(engines::get_engine)
                .put(engines::update_engine)
                .delete(engines::delete_engine),
        )
        // Availability
        .route("/disponibility", get(disponibility::list))
        .route("/disponibility/available", post(disponibility::mark_available))
        .route("/disponibility/unavailable", post(disponibility::mark_unavailable))
        .route("/disponibility/move", post(disponibility::move_engine))
        // Assignment
        .route("/affectation", get(affectation::list))
        .route("/affectation/stats", get(affectation::stats))
        .route("/affectation/assign", post(affectation::assign))
        .route("/affectation/unassign", post(affectation::unassign))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
