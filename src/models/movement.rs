//! Partition move request bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::enums::Availability;

/// Body naming a single engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineRef {
    pub engine_id: String,
}

/// Take an engine out of service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkUnavailable {
    pub engine_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_return: Option<NaiveDate>,
}

/// Move an engine to an explicit availability side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub engine_id: String,
    pub to: Availability,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub estimated_return: Option<NaiveDate>,
}

/// Assign an engine to a requesting department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub engine_id: String,
    pub demandeur: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_affectation: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

/// One backend state transition, as sent by reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    MarkAvailable(EngineRef),
    MarkUnavailable(MarkUnavailable),
    Assign(AssignRequest),
    Unassign(EngineRef),
}

impl Transition {
    pub fn engine_id(&self) -> &str {
        match self {
            Transition::MarkAvailable(r) | Transition::Unassign(r) => &r.engine_id,
            Transition::MarkUnavailable(r) => &r.engine_id,
            Transition::Assign(r) => &r.engine_id,
        }
    }

    /// Route the transition is posted to, relative to the API root
    pub fn endpoint(&self) -> &'static str {
        match self {
            Transition::MarkAvailable(_) => "/disponibility/available",
            Transition::MarkUnavailable(_) => "/disponibility/unavailable",
            Transition::Assign(_) => "/affectation/assign",
            Transition::Unassign(_) => "/affectation/unassign",
        }
    }
}
