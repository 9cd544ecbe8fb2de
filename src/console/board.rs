//! One screen's worth of state: collection, filter, pending moves
//!
//! A board is created when a view mounts and dropped when it unmounts.
//! Drag-and-drop and button clicks both land in [`Board::move_engine`].

use crate::{
    error::{ClientError, ClientResult, ValidationError},
    models::engine::EngineRecord,
};

use super::{
    change_set::{ChangeSet, MoveOutcome},
    collection::EngineCollection,
    filter::FilterPredicate,
    partition::{compute, AssignmentScheme, AvailabilityScheme, MoveDetails, PartitionScheme, PartitionView, Side},
    reconcile::{apply_settled, plan, FleetBackend, PlannedMove, ReconcileReport, ReconciliationClient, SettledMove},
    stats::FleetStats,
};

/// Requests captured for one save, tagged with the board epoch
#[derive(Debug, Clone)]
pub struct PreparedSave {
    epoch: u64,
    pub moves: Vec<PlannedMove>,
}

pub struct Board<S> {
    scheme: S,
    collection: EngineCollection,
    changes: ChangeSet,
    filter: FilterPredicate,
    epoch: u64,
    detached: bool,
}

/// Availability screen (available / unavailable)
pub type AvailabilityBoard = Board<AvailabilityScheme>;

/// Assignment screen (available / affected)
pub type AssignmentBoard = Board<AssignmentScheme>;

impl<S: PartitionScheme> Board<S> {
    pub fn new(scheme: S, records: Vec<EngineRecord>) -> Result<Self, ValidationError> {
        Ok(Self {
            scheme,
            collection: EngineCollection::from_records(records)?,
            changes: ChangeSet::new(),
            filter: FilterPredicate::default(),
            epoch: 0,
            detached: false,
        })
    }

    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    pub fn collection(&self) -> &EngineCollection {
        &self.collection
    }

    /// Direct access for create/update/delete screens. Partition moves
    /// must go through `move_engine` to be tracked.
    pub fn collection_mut(&mut self) -> &mut EngineCollection {
        &mut self.collection
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn filter(&self) -> &FilterPredicate {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterPredicate) {
        self.filter = filter;
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterPredicate::default();
    }

    pub fn side_of(&self, id: &str) -> Option<Side> {
        self.collection.get(id).map(|r| self.scheme.side_of(r))
    }

    pub fn view(&self) -> PartitionView {
        compute(&self.collection, &self.filter, |r| self.scheme.side_of(r))
    }

    pub fn stats(&self) -> FleetStats {
        FleetStats::from_view(&self.view())
    }

    /// Move an engine to `to`, optimistically
    pub fn move_engine(&mut self, id: &str, to: Side, details: &MoveDetails) -> ClientResult<MoveOutcome> {
        let before = self
            .collection
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        let from = self.scheme.side_of(&before);
        if from == to {
            return Ok(MoveOutcome::Unchanged);
        }

        let mut after = before.clone();
        self.scheme.apply(&mut after, to, details)?;

        let outcome = self.changes.record_move(&before, &after, from, to);
        match &outcome {
            MoveOutcome::Recorded => self.collection.restore(after),
            MoveOutcome::Cancelled(baseline) => self.collection.restore(baseline.clone()),
            MoveOutcome::Unchanged => {}
        }
        tracing::debug!(engine_id = id, from = self.scheme.label(from), to = self.scheme.label(to), ?outcome, "Engine moved");
        Ok(outcome)
    }

    /// Drop an engine onto a zone, identified by its label
    pub fn drop_on(&mut self, id: &str, zone: &str, details: &MoveDetails) -> ClientResult<MoveOutcome> {
        match self.scheme.classify_drop(zone) {
            Some(to) => self.move_engine(id, to, details),
            None => Ok(MoveOutcome::Unchanged),
        }
    }

    /// Replace the collection with fresh backend data, dropping unsaved moves
    pub fn reload(&mut self, records: Vec<EngineRecord>) -> Result<(), ValidationError> {
        self.collection.load(records)?;
        if !self.changes.is_empty() {
            tracing::info!(discarded = self.changes.pending_count(), "Discarding unsaved moves on reload");
        }
        self.changes.clear();
        self.epoch += 1;
        Ok(())
    }

    /// Mark the view as torn down. Saves still in flight will complete but
    /// their results are ignored.
    pub fn detach(&mut self) {
        self.detached = true;
        self.epoch += 1;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn prepare_save(&self) -> PreparedSave {
        PreparedSave {
            epoch: self.epoch,
            moves: plan(&self.changes, &self.scheme),
        }
    }

    /// Apply backend answers, unless the board was detached or reloaded
    /// since the save was prepared
    pub fn complete_save(&mut self, prepared: &PreparedSave, settled: Vec<SettledMove>) -> Option<ReconcileReport> {
        if self.detached || prepared.epoch != self.epoch {
            tracing::debug!("Discarding save results for a stale view");
            return None;
        }
        Some(apply_settled(&mut self.changes, &mut self.collection, settled))
    }

    pub async fn save<B: FleetBackend>(&mut self, client: &ReconciliationClient<B>) -> Option<ReconcileReport> {
        let prepared = self.prepare_save();
        let settled = client.dispatch(prepared.moves.clone()).await;
        self.complete_save(&prepared, settled)
    }
}
