//! In-memory storage for the reference backend

pub mod engines;
pub mod users;

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::models::engine::EngineRecord;

pub use users::StoredUser;

/// Main repository struct. Clones share the same storage.
#[derive(Clone, Default)]
pub struct Repository {
    engines: Arc<RwLock<IndexMap<String, EngineRecord>>>,
    users: Arc<RwLock<IndexMap<String, StoredUser>>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
