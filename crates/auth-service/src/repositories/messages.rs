use super::MessageStore;
use crate::errors::ApiError;
use crate::models::Message;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<String, Message>>,
}

impl InMemoryMessageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn get(&self, id: &str) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.read().await.get(id).cloned())
    }

    async fn put(&self, message: Message) -> Result<(), ApiError> {
        self.messages
            .write()
            .await
            .insert(message.id.clone(), message);
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<Option<Message>, ApiError> {
        Ok(self.messages.write().await.remove(id))
    }

    async fn list(&self) -> Result<Vec<Message>, ApiError> {
        let mut messages: Vec<Message> = self.messages.read().await.values().cloned().collect();
        messages.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(messages)
    }
}
