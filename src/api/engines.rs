//! Engine catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    console::{filter::FilterPredicate, stats::FleetStats},
    error::AppResult,
    models::{
        bulk::{
            BulkCreateRequest, BulkCreateResponse, BulkDeleteRequest, BulkDeleteResponse, BulkUpdateRequest,
            BulkUpdateResponse,
        },
        engine::EngineRecord,
        listing::EngineList,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List engines matching the filter
#[utoipa::path(
    get,
    path = "/engines",
    tag = "engines",
    security(("bearer_auth" = [])),
    params(FilterPredicate),
    responses(
        (status = 200, description = "Engine list", body = EngineList),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_engines(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(filter): Query<FilterPredicate>,
) -> AppResult<Json<EngineList>> {
    let engines = state.services.engines.list(&filter).await?;
    Ok(Json(EngineList { engines }))
}

/// Get engine by ID
#[utoipa::path(
    get,
    path = "/engines/{id}",
    tag = "engines",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Engine ID")),
    responses(
        (status = 200, description = "Engine details", body = EngineRecord),
        (status = 404, description = "Engine not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_engine(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<EngineRecord>> {
    let engine = state.services.engines.get_by_id(&id).await?;
    Ok(Json(engine))
}

/// Create engine
#[utoipa::path(
    post,
    path = "/engines",
    tag = "engines",
    security(("bearer_auth" = [])),
    request_body = EngineRecord,
    responses(
        (status = 201, description = "Engine created", body = EngineRecord),
        (status = 400, description = "Invalid engine", body = crate::error::ErrorResponse),
        (status = 409, description = "Duplicate id", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_engine(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(record): Json<EngineRecord>,
) -> AppResult<(StatusCode, Json<EngineRecord>)> {
    claims.require_write()?;
    let engine = state.services.engines.create(record).await?;
    Ok((StatusCode::CREATED, Json(engine)))
}

/// Update engine
#[utoipa::path(
    put,
    path = "/engines/{id}",
    tag = "engines",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Engine ID")),
    request_body = EngineRecord,
    responses(
        (status = 200, description = "Engine updated", body = EngineRecord),
        (status = 404, description = "Engine not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_engine(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(record): Json<EngineRecord>,
) -> AppResult<Json<EngineRecord>> {
    claims.require_write()?;
    let engine = state.services.engines.update(&id, record).await?;
    Ok(Json(engine))
}

/// Delete engine
#[utoipa::path(
    delete,
    path = "/engines/{id}",
    tag = "engines",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Engine ID")),
    responses(
        (status = 204, description = "Engine deleted"),
        (status = 404, description = "Engine not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_engine(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require_write()?;
    state.services.engines.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Import engines, reporting rejected rows
#[utoipa::path(
    post,
    path = "/engines/bulk",
    tag = "engines",
    security(("bearer_auth" = [])),
    request_body = BulkCreateRequest,
    responses(
        (status = 200, description = "Rows created and rows rejected", body = BulkCreateResponse)
    )
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BulkCreateRequest>,
) -> AppResult<Json<BulkCreateResponse>> {
    claims.require_write()?;
    let response = state.services.engines.bulk_create(request.engines).await?;
    Ok(Json(response))
}

/// Update several engines at once
#[utoipa::path(
    put,
    path = "/engines/bulk",
    tag = "engines",
    security(("bearer_auth" = [])),
    request_body = BulkUpdateRequest,
    responses(
        (status = 200, description = "Rows updated and rows rejected", body = BulkUpdateResponse)
    )
)]
pub async fn bulk_update(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BulkUpdateRequest>,
) -> AppResult<Json<BulkUpdateResponse>> {
    claims.require_write()?;
    let response = state.services.engines.bulk_update(request.engines).await?;
    Ok(Json(response))
}

/// Delete several engines at once
#[utoipa::path(
    delete,
    path = "/engines/bulk",
    tag = "engines",
    security(("bearer_auth" = [])),
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Ids deleted and ids rejected", body = BulkDeleteResponse)
    )
)]
pub async fn bulk_delete(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<BulkDeleteRequest>,
) -> AppResult<Json<BulkDeleteResponse>> {
    claims.require_write()?;
    let response = state.services.engines.bulk_delete(request.engine_ids).await?;
    Ok(Json(response))
}

/// Fleet availability figures
#[utoipa::path(
    get,
    path = "/engines/stats",
    tag = "engines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Availability statistics", body = FleetStats)
    )
)]
pub async fn engine_stats(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<FleetStats>> {
    let stats = state.services.engines.stats().await?;
    Ok(Json(stats))
}
