//! Pending partition moves not yet confirmed by the backend

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{error::ClientError, models::engine::EngineRecord};

use super::partition::Side;

/// One engine's net move since the last successful save
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub engine_id: String,
    pub from: Side,
    pub to: Side,
    pub recorded_at: DateTime<Utc>,
    /// Committed state before the first move, restored on rollback
    pub baseline: EngineRecord,
    /// Optimistic state, sent to the backend and committed on success
    pub proposed: EngineRecord,
    pub error: Option<ClientError>,
}

impl PendingMove {
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of recording a move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The move is pending
    Recorded,
    /// The record went back to where it started, carrying the state to restore
    Cancelled(EngineRecord),
    /// Nothing to do (same side, or unrecognised drop zone)
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    entries: IndexMap<String, PendingMove>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `before` moved from `from` to `to`, ending up as `after`.
    ///
    /// Successive moves of one engine collapse into a single net move; a
    /// move back to the original side drops the entry altogether.
    pub fn record_move(&mut self, before: &EngineRecord, after: &EngineRecord, from: Side, to: Side) -> MoveOutcome {
        if from == to {
            return MoveOutcome::Unchanged;
        }

        if let Some(entry) = self.entries.get_mut(&before.id) {
            if entry.from == to {
                let baseline = entry.baseline.clone();
                self.entries.shift_remove(&before.id);
                return MoveOutcome::Cancelled(baseline);
            }
            entry.to = to;
            entry.proposed = after.clone();
            entry.recorded_at = Utc::now();
            entry.error = None;
            return MoveOutcome::Recorded;
        }

        self.entries.insert(
            before.id.clone(),
            PendingMove {
                engine_id: before.id.clone(),
                from,
                to,
                recorded_at: Utc::now(),
                baseline: before.clone(),
                proposed: after.clone(),
                error: None,
            },
        );
        MoveOutcome::Recorded
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending moves, in order of each engine's first move
    pub fn entries(&self) -> impl Iterator<Item = &PendingMove> {
        self.entries.values()
    }

    pub fn get(&self, id: &str) -> Option<&PendingMove> {
        self.entries.get(id)
    }

    pub fn failed(&self) -> impl Iterator<Item = &PendingMove> {
        self.entries.values().filter(|e| e.is_failed())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flag an entry as failed without dropping it. Returns false if `id`
    /// has no pending move.
    pub fn mark_failed(&mut self, id: &str, error: ClientError) -> bool {
        match self.entries.get_mut(id) {
            Some(entry) => {
                entry.error = Some(error);
                true
            }
            None => false,
        }
    }

    /// Drop the entry of a move the backend confirmed
    pub fn resolve(&mut self, id: &str) -> Option<PendingMove> {
        self.entries.shift_remove(id)
    }
}
