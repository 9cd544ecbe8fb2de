//! Reconciliation of a change set against the backend
//!
//! Every pending move becomes exactly one backend request. Requests fan out
//! concurrently and fail independently: one rejected move never aborts its
//! siblings. Outcomes are applied in change-set order, committing the
//! proposed record on success and rolling back to the baseline on failure.
//! An answer for a move that was edited after it was sent is reported as
//! stale; a stale success commits the record the backend actually received.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;

use crate::{
    config::ClientConfig,
    error::{ClientError, ClientResult},
    models::{engine::EngineRecord, movement::Transition},
};

use super::{change_set::ChangeSet, collection::EngineCollection, partition::PartitionScheme};

/// Default bound on concurrent requests per save
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Remote collaborator that commits partition moves
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FleetBackend: Send + Sync {
    async fn apply(&self, transition: &Transition) -> ClientResult<()>;
}

#[async_trait]
impl<B: FleetBackend + ?Sized> FleetBackend for std::sync::Arc<B> {
    async fn apply(&self, transition: &Transition) -> ClientResult<()> {
        (**self).apply(transition).await
    }
}

/// A request about to be sent, with the record it commits
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedMove {
    pub transition: Transition,
    pub proposed: EngineRecord,
}

/// Backend answer for one engine
#[derive(Debug, Clone, PartialEq)]
pub struct SettledMove {
    pub engine_id: String,
    /// Record the request committed
    pub sent: EngineRecord,
    pub result: ClientResult<()>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FailedMove {
    pub engine_id: String,
    pub error: ClientError,
}

/// Batch summary of one save
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedMove>,
    /// Answers for moves edited or cancelled while the request was in flight
    pub stale: Vec<String>,
}

impl ReconcileReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.stale.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.stale.is_empty()
    }

    /// "N succeeded, M failed", plus the stale count when there is one
    pub fn summary(&self) -> String {
        let mut summary = format!("{} succeeded, {} failed", self.succeeded.len(), self.failed.len());
        if !self.stale.is_empty() {
            summary.push_str(&format!(", {} stale", self.stale.len()));
        }
        summary
    }
}

/// Build one request per pending move, from its proposed state
pub fn plan<S: PartitionScheme + ?Sized>(changes: &ChangeSet, scheme: &S) -> Vec<PlannedMove> {
    changes
        .entries()
        .map(|entry| PlannedMove {
            transition: scheme.transition(&entry.proposed, entry.to),
            proposed: entry.proposed.clone(),
        })
        .collect()
}

pub struct ReconciliationClient<B> {
    backend: B,
    max_in_flight: usize,
}

impl<B: FleetBackend> ReconciliationClient<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Client bounded by `client.max_in_flight`
    pub fn from_config(backend: B, config: &ClientConfig) -> Self {
        Self::new(backend).with_max_in_flight(config.max_in_flight)
    }

    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send every planned move once. Touches no local state.
    pub async fn dispatch(&self, moves: Vec<PlannedMove>) -> Vec<SettledMove> {
        stream::iter(moves)
            .map(|planned| async move {
                let transition = &planned.transition;
                tracing::debug!(engine_id = transition.engine_id(), endpoint = transition.endpoint(), "Sending move");
                let result = self.backend.apply(transition).await;
                SettledMove {
                    engine_id: transition.engine_id().to_string(),
                    sent: planned.proposed,
                    result,
                }
            })
            .buffer_unordered(self.max_in_flight)
            .collect()
            .await
    }

    /// Reconcile the whole change set: dispatch, then apply outcomes
    pub async fn save<S: PartitionScheme + ?Sized>(
        &self,
        changes: &mut ChangeSet,
        collection: &mut EngineCollection,
        scheme: &S,
    ) -> ReconcileReport {
        let settled = self.dispatch(plan(changes, scheme)).await;
        apply_settled(changes, collection, settled)
    }
}

/// Apply backend answers in change-set order, then the answers whose move
/// is no longer pending.
pub fn apply_settled(
    changes: &mut ChangeSet,
    collection: &mut EngineCollection,
    settled: Vec<SettledMove>,
) -> ReconcileReport {
    let mut by_id: IndexMap<String, SettledMove> =
        settled.into_iter().map(|s| (s.engine_id.clone(), s)).collect();
    let order: Vec<String> = changes.entries().map(|e| e.engine_id.clone()).collect();

    let mut report = ReconcileReport::default();
    for id in order {
        let Some(answer) = by_id.shift_remove(&id) else {
            continue;
        };
        let current = changes.get(&id).is_some_and(|entry| entry.proposed == answer.sent);
        if !current {
            settle_stale(changes, collection, answer, &mut report);
            continue;
        }
        match answer.result {
            Ok(()) => {
                if let Some(entry) = changes.resolve(&id) {
                    collection.restore(entry.proposed);
                }
                report.succeeded.push(id);
            }
            Err(error) => {
                tracing::warn!(engine_id = %id, error = %error, "Move rejected, rolling back");
                if let Some(entry) = changes.get(&id) {
                    collection.restore(entry.baseline.clone());
                }
                changes.mark_failed(&id, error.clone());
                report.failed.push(FailedMove { engine_id: id, error });
            }
        }
    }

    for (_, answer) in by_id {
        settle_stale(changes, collection, answer, &mut report);
    }

    tracing::info!("Reconciliation finished: {}", report.summary());
    report
}

/// The backend state now follows the request that was sent, whatever the
/// view did meanwhile. A rejected stale request changed nothing remotely.
fn settle_stale(
    changes: &mut ChangeSet,
    collection: &mut EngineCollection,
    answer: SettledMove,
    report: &mut ReconcileReport,
) {
    let id = answer.engine_id;
    match answer.result {
        Ok(()) => {
            tracing::warn!(engine_id = %id, "Move was edited while in flight, keeping the committed record");
            changes.resolve(&id);
            if collection.contains(&id) {
                collection.restore(answer.sent);
            }
        }
        Err(error) => {
            tracing::debug!(engine_id = %id, error = %error, "Ignoring failure of a superseded move");
        }
    }
    report.stale.push(id);
}
