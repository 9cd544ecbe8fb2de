//! Assignment screen endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    console::{filter::FilterPredicate, stats::FleetStats},
    error::AppResult,
    models::{
        engine::EngineRecord,
        listing::AffectationListing,
        movement::{AssignRequest, EngineRef},
    },
    AppState,
};

use super::AuthenticatedUser;

/// Available and affected engines, filtered
#[utoipa::path(
    get,
    path = "/affectation",
    tag = "affectation",
    security(("bearer_auth" = [])),
    params(FilterPredicate),
    responses(
        (status = 200, description = "Engines split by assignment", body = AffectationListing)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<FilterPredicate>,
) -> AppResult<Json<AffectationListing>> {
    let listing = state.services.affectation.list(&filter).await?;
    Ok(Json(listing))
}

/// Assignment figures per type and department
#[utoipa::path(
    get,
    path = "/affectation/stats",
    tag = "affectation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Assignment statistics", body = FleetStats)
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<FleetStats>> {
    let stats = state.services.affectation.stats().await?;
    Ok(Json(stats))
}

/// Assign an engine to a department
#[utoipa::path(
    post,
    path = "/affectation/assign",
    tag = "affectation",
    security(("bearer_auth" = [])),
    request_body = AssignRequest,
    responses(
        (status = 200, description = "Engine assigned", body = EngineRecord),
        (status = 400, description = "Missing demandeur", body = crate::error::ErrorResponse),
        (status = 409, description = "Engine unavailable or already affected", body = crate::error::ErrorResponse)
    )
)]
pub async fn assign(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<AssignRequest>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.affectation.assign(&request).await?;
    Ok(Json(engine))
}

/// Release an engine
#[utoipa::path(
    post,
    path = "/affectation/unassign",
    tag = "affectation",
    security(("bearer_auth" = [])),
    request_body = EngineRef,
    responses(
        (status = 200, description = "Engine released", body = EngineRecord),
        (status = 409, description = "Engine not affected", body = crate::error::ErrorResponse)
    )
)]
pub async fn unassign(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<EngineRef>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.affectation.unassign(&request).await?;
    Ok(Json(engine))
}
