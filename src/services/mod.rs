//! Business logic services

pub mod affectation;
pub mod auth;
pub mod disponibility;
pub mod engines;

use crate::{
    config::{AuthConfig, SeedUser},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub engines: engines::EnginesService,
    pub disponibility: disponibility::DisponibilityService,
    pub affectation: affectation::AffectationService,
}

impl Services {
    /// Create all services with the given repository and register seed users
    pub async fn new(repository: Repository, auth_config: AuthConfig, users: &[SeedUser]) -> AppResult<Self> {
        let auth = auth::AuthService::new(repository.clone(), auth_config);
        auth.seed_users(users).await?;

        Ok(Self {
            auth,
            engines: engines::EnginesService::new(repository.clone()),
            disponibility: disponibility::DisponibilityService::new(repository.clone()),
            affectation: affectation::AffectationService::new(repository),
        })
    }
}
