//! Authentication service

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::{
    config::{AuthConfig, SeedUser},
    error::{AppError, AppResult},
    models::user::{LoginResponse, UserClaims},
    repository::{Repository, StoredUser},
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }

    /// Hash and store the configured users
    pub async fn seed_users(&self, users: &[SeedUser]) -> AppResult<()> {
        for user in users {
            self.repository
                .users_upsert(StoredUser {
                    login: user.login.clone(),
                    name: user.name.clone(),
                    role: user.role,
                    password_hash: hash_password(&user.password)?,
                })
                .await;
        }
        tracing::info!(count = users.len(), "Seed users registered");
        Ok(())
    }

    /// Authenticate by login and password, returning a fresh token pair
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users_get_by_login(login)
            .await
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !verify_password(&user, password)? {
            tracing::warn!(login, "Rejected login attempt");
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.login.clone(),
            name: user.name.clone(),
            role: user.role,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };
        let access_token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(login, "User logged in");
        Ok(LoginResponse {
            access_token,
            refresh_token: Uuid::new_v4().to_string(),
            user: user.info(),
        })
    }
}

fn verify_password(user: &StoredUser, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}
