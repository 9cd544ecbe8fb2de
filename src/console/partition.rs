//! Two-sided partition of an engine collection
//!
//! A [`PartitionScheme`] derives which side a record sits on. [`compute`]
//! projects a collection into two disjoint, filtered lists. The partition
//! key is never stored on the record itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::ValidationError,
    models::{
        engine::EngineRecord,
        enums::{Availability, EngineType},
        movement::{AssignRequest, EngineRef, MarkUnavailable, Transition},
    },
};

use super::{collection::EngineCollection, filter::FilterPredicate};

/// Default reason recorded when an engine is taken out of service by hand
pub const MANUAL_REASON: &str = "Manual Assignment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Read-only projection of a collection into two disjoint lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionView {
    pub left: Vec<EngineRecord>,
    pub right: Vec<EngineRecord>,
}

impl PartitionView {
    pub fn side(&self, side: Side) -> &[EngineRecord] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &EngineRecord> {
        self.left.iter().chain(self.right.iter())
    }
}

/// Split `collection` by `partition_fn`, keeping only records matching
/// `predicate`. Both lists keep insertion order.
pub fn compute<F>(collection: &EngineCollection, predicate: &FilterPredicate, partition_fn: F) -> PartitionView
where
    F: Fn(&EngineRecord) -> Side,
{
    let mut view = PartitionView::default();
    for record in collection.all().filter(|r| predicate.matches(r)) {
        let side = partition_fn(record);
        if predicate.side.is_some_and(|only| only != side) {
            continue;
        }
        match side {
            Side::Left => view.left.push(record.clone()),
            Side::Right => view.right.push(record.clone()),
        }
    }
    view
}

/// Distinct families, in first-seen order, for the filter bar
pub fn distinct_families(collection: &EngineCollection) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    for record in collection.all() {
        if !families.iter().any(|f| f == &record.family) {
            families.push(record.family.clone());
        }
    }
    families
}

/// Types present in the collection, in enum order
pub fn distinct_types(collection: &EngineCollection) -> Vec<EngineType> {
    EngineType::ALL
        .into_iter()
        .filter(|t| collection.all().any(|r| r.engine_type == *t))
        .collect()
}

/// Values a move writes onto the record's metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveDetails {
    pub demandeur: Option<String>,
    pub date_affectation: Option<NaiveDate>,
    pub operator: Option<String>,
    pub reason: Option<String>,
    pub estimated_return: Option<NaiveDate>,
}

impl MoveDetails {
    pub fn assign_to(demandeur: impl Into<String>) -> Self {
        Self {
            demandeur: Some(demandeur.into()),
            ..Default::default()
        }
    }

    pub fn out_of_service(reason: impl Into<String>, estimated_return: Option<NaiveDate>) -> Self {
        Self {
            reason: Some(reason.into()),
            estimated_return,
            ..Default::default()
        }
    }
}

/// A two-valued partition key with its move semantics
pub trait PartitionScheme: Send + Sync {
    fn side_of(&self, record: &EngineRecord) -> Side;

    /// Drop-zone label of a side
    fn label(&self, side: Side) -> &'static str;

    /// Optimistically rewrite `record` so that it sits on `to`
    fn apply(&self, record: &mut EngineRecord, to: Side, details: &MoveDetails) -> Result<(), ValidationError>;

    /// Backend request that commits `record` (already rewritten) on `to`
    fn transition(&self, record: &EngineRecord, to: Side) -> Transition;

    /// Map a drop-zone label onto a side
    fn classify_drop(&self, zone: &str) -> Option<Side> {
        let zone = zone.trim();
        [Side::Left, Side::Right]
            .into_iter()
            .find(|side| self.label(*side).eq_ignore_ascii_case(zone))
    }
}

/// Available (left) / unavailable (right), keyed by `status`
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityScheme;

impl PartitionScheme for AvailabilityScheme {
    fn side_of(&self, record: &EngineRecord) -> Side {
        match record.status {
            Availability::Available => Side::Left,
            Availability::Unavailable => Side::Right,
        }
    }

    fn label(&self, side: Side) -> &'static str {
        match side {
            Side::Left => "available",
            Side::Right => "unavailable",
        }
    }

    fn apply(&self, record: &mut EngineRecord, to: Side, details: &MoveDetails) -> Result<(), ValidationError> {
        match to {
            Side::Left => {
                record.status = Availability::Available;
                record.metadata.reason = None;
                record.metadata.estimated_return = None;
            }
            Side::Right => {
                record.status = Availability::Unavailable;
                let reason = details
                    .reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .unwrap_or(MANUAL_REASON);
                record.metadata.reason = Some(reason.to_string());
                record.metadata.estimated_return = details.estimated_return;
            }
        }
        Ok(())
    }

    fn transition(&self, record: &EngineRecord, to: Side) -> Transition {
        match to {
            Side::Left => Transition::MarkAvailable(EngineRef {
                engine_id: record.id.clone(),
            }),
            Side::Right => Transition::MarkUnavailable(MarkUnavailable {
                engine_id: record.id.clone(),
                reason: record.metadata.reason.clone(),
                estimated_return: record.metadata.estimated_return,
            }),
        }
    }
}

/// Available (left) / affected (right), keyed by the requesting department
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentScheme;

impl PartitionScheme for AssignmentScheme {
    fn side_of(&self, record: &EngineRecord) -> Side {
        if record.is_assigned() {
            Side::Right
        } else {
            Side::Left
        }
    }

    fn label(&self, side: Side) -> &'static str {
        match side {
            Side::Left => "available",
            Side::Right => "affected",
        }
    }

    fn apply(&self, record: &mut EngineRecord, to: Side, details: &MoveDetails) -> Result<(), ValidationError> {
        match to {
            Side::Left => {
                record.metadata.demandeur = None;
                record.metadata.date_affectation = None;
                record.metadata.operator = None;
            }
            Side::Right => {
                let demandeur = details
                    .demandeur
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| ValidationError::field("demandeur", "Demandeur is required to assign an engine"))?;
                record.metadata.demandeur = Some(demandeur.to_string());
                record.metadata.date_affectation = details.date_affectation;
                record.metadata.operator = details.operator.clone();
            }
        }
        Ok(())
    }

    fn transition(&self, record: &EngineRecord, to: Side) -> Transition {
        match to {
            Side::Left => Transition::Unassign(EngineRef {
                engine_id: record.id.clone(),
            }),
            Side::Right => Transition::Assign(AssignRequest {
                engine_id: record.id.clone(),
                demandeur: record.metadata.demandeur.clone().unwrap_or_default(),
                date_affectation: record.metadata.date_affectation,
                operator: record.metadata.operator.clone(),
            }),
        }
    }
}
