//! Storage collaborators.
//!
//! Handlers only see the traits; the in-memory implementations are injected
//! through `AppState` at startup (or by tests).

pub mod messages;
pub mod users;

use crate::errors::ApiError;
use crate::models::{Message, User};

pub use messages::InMemoryMessageStore;
pub use users::InMemoryUserStore;

/// Lookup and creation of users.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_login_name(&self, username: &str) -> Result<Option<User>, ApiError>;

    /// Create a user with a fresh id.
    ///
    /// Fails with `ApiError::UserExists` if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, ApiError>;

    async fn list(&self) -> Result<Vec<User>, ApiError>;
}

/// Keyed message storage.
#[async_trait::async_trait]
pub trait MessageStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Message>, ApiError>;

    /// Insert or replace by `message.id`.
    async fn put(&self, message: Message) -> Result<(), ApiError>;

    /// Remove by id, returning the removed message if it existed.
    async fn remove(&self, id: &str) -> Result<Option<Message>, ApiError>;

    async fn list(&self) -> Result<Vec<Message>, ApiError>;
}
