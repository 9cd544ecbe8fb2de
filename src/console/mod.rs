//! Client-side fleet console core
//!
//! Everything a screen needs between the backend and the view: the engine
//! collection, filtering, the two-sided partition, pending moves and their
//! reconciliation against the REST backend.

pub mod board;
pub mod change_set;
pub mod collection;
pub mod filter;
pub mod http;
pub mod partition;
pub mod reconcile;
pub mod stats;

pub use board::{AssignmentBoard, AvailabilityBoard, Board};
pub use change_set::{ChangeSet, MoveOutcome, PendingMove};
pub use collection::EngineCollection;
pub use filter::FilterPredicate;
pub use http::ApiClient;
pub use partition::{compute, AssignmentScheme, AvailabilityScheme, MoveDetails, PartitionScheme, PartitionView, Side};
pub use reconcile::{FleetBackend, PlannedMove, ReconcileReport, ReconciliationClient};
pub use stats::FleetStats;
