//! Console users

use crate::models::user::{Role, UserInfo};

use super::Repository;

/// A user with its Argon2 password hash
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub login: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
}

impl StoredUser {
    pub fn info(&self) -> UserInfo {
        UserInfo {
            login: self.login.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

impl Repository {
    pub async fn users_get_by_login(&self, login: &str) -> Option<StoredUser> {
        self.users.read().await.get(login).cloned()
    }

    /// Insert or replace a user
    pub async fn users_upsert(&self, user: StoredUser) {
        self.users.write().await.insert(user.login.clone(), user);
    }
}
