//! Listing response bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::engine::EngineRecord;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EngineList {
    pub engines: Vec<EngineRecord>,
}

/// Availability screen, both sides filtered the same way
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisponibilityListing {
    pub available: Vec<EngineRecord>,
    pub unavailable: Vec<EngineRecord>,
}

/// Assignment screen
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AffectationListing {
    pub available: Vec<EngineRecord>,
    pub affected: Vec<EngineRecord>,
}
