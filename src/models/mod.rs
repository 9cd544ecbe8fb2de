//! Data models shared by the console and the reference backend

pub mod bulk;
pub mod engine;
pub mod enums;
pub mod listing;
pub mod movement;
pub mod user;

// Re-export commonly used types
pub use engine::{EngineDraft, EngineMetadata, EngineRecord};
pub use enums::{Availability, EngineType};
pub use movement::Transition;
pub use user::{Role, UserClaims, UserInfo};
