//! Fleet Console
//!
//! Engine availability and assignment management. The `console` module holds
//! the client-side core (collection, filtering, partitioning, pending moves and
//! their reconciliation). The `api`, `services` and `repository` modules form
//! an in-memory REST backend speaking the same JSON contract.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ClientError, ClientResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
