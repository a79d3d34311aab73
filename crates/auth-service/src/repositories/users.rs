use super::UserStore;
use crate::errors::ApiError;
use crate::models::User;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User store keyed by id, with usernames unique.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing users. Later entries win on id collisions.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_login_name(&self, username: &str) -> Result<Option<User>, ApiError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<User, ApiError> {
        // Uniqueness check and insert share one write lock.
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == username) {
            return Err(ApiError::UserExists);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, ApiError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}
