//! Bulk engine operations with per-row error reporting

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::engine::{EngineDraft, EngineRecord};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkCreateRequest {
    pub engines: Vec<EngineDraft>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkUpdateRequest {
    pub engines: Vec<EngineRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    pub engine_ids: Vec<String>,
}

/// A row that was rejected, the others still went through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkRowError {
    /// Position of the row in the request
    pub index: usize,
    pub engine_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCreateResponse {
    pub created_engines: Vec<EngineRecord>,
    pub errors: Vec<BulkRowError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateResponse {
    pub updated_engines: Vec<EngineRecord>,
    pub errors: Vec<BulkRowError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub deleted_engines: Vec<String>,
    pub errors: Vec<BulkRowError>,
}
