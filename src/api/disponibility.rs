//! Availability screen endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    console::filter::FilterPredicate,
    error::AppResult,
    models::{
        engine::EngineRecord,
        listing::DisponibilityListing,
        movement::{EngineRef, MarkUnavailable, MoveRequest},
    },
    AppState,
};

use super::AuthenticatedUser;

/// Available and unavailable engines, filtered
#[utoipa::path(
    get,
    path = "/disponibility",
    tag = "disponibility",
    security(("bearer_auth" = [])),
    params(FilterPredicate),
    responses(
        (status = 200, description = "Engines split by availability", body = DisponibilityListing)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<FilterPredicate>,
) -> AppResult<Json<DisponibilityListing>> {
    let listing = state.services.disponibility.list(&filter).await?;
    Ok(Json(listing))
}

/// Put an engine back in service
#[utoipa::path(
    post,
    path = "/disponibility/available",
    tag = "disponibility",
    security(("bearer_auth" = [])),
    request_body = EngineRef,
    responses(
        (status = 200, description = "Engine available", body = EngineRecord),
        (status = 404, description = "Engine not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Engine already available", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_available(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<EngineRef>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.disponibility.mark_available(&request).await?;
    Ok(Json(engine))
}

/// Take an engine out of service
#[utoipa::path(
    post,
    path = "/disponibility/unavailable",
    tag = "disponibility",
    security(("bearer_auth" = [])),
    request_body = MarkUnavailable,
    responses(
        (status = 200, description = "Engine unavailable", body = EngineRecord),
        (status = 404, description = "Engine not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Engine already unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn mark_unavailable(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<MarkUnavailable>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.disponibility.mark_unavailable(&request).await?;
    Ok(Json(engine))
}

/// Move an engine to an explicit availability
#[utoipa::path(
    post,
    path = "/disponibility/move",
    tag = "disponibility",
    security(("bearer_auth" = [])),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Engine moved", body = EngineRecord),
        (status = 409, description = "Engine already in that state", body = crate::error::ErrorResponse)
    )
)]
pub async fn move_engine(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<MoveRequest>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.disponibility.move_engine(&request).await?;
    Ok(Json(engine))
}
