//! Per-chat state storage

use crate::error::StoreError;
use crate::state::{InitialState, SharedState};
use crate::update::ChatId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Storage for the current state of every chat.
///
/// Implementations must be linearizable per chat: once `put` returns, every
/// subsequent `load` for that chat, from any caller, observes the new state.
/// A failed `put` must leave the previous state in place.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Stored state for the chat, if there is one
    async fn load(&self, chat: &ChatId) -> Result<Option<SharedState>, StoreError>;

    /// Replace the chat's state
    async fn put(&self, chat: &ChatId, state: SharedState) -> Result<(), StoreError>;

    /// Stored state, or the initial state for a chat seen for the first time.
    ///
    /// The initial state is not written back; the entry is created by the
    /// first successful transition.
    async fn get(&self, chat: &ChatId, initial: &InitialState) -> Result<SharedState, StoreError> {
        Ok(match self.load(chat).await? {
            Some(state) => state,
            None => initial(chat),
        })
    }
}

#[async_trait]
impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    async fn load(&self, chat: &ChatId) -> Result<Option<SharedState>, StoreError> {
        (**self).load(chat).await
    }

    async fn put(&self, chat: &ChatId, state: SharedState) -> Result<(), StoreError> {
        (**self).put(chat, state).await
    }

    async fn get(&self, chat: &ChatId, initial: &InitialState) -> Result<SharedState, StoreError> {
        (**self).get(chat, initial).await
    }
}

/// Process-local store
#[derive(Default)]
pub struct InMemoryStore {
    states: RwLock<HashMap<ChatId, SharedState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with a stored state
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }

    /// Stored state without the fallback
    pub async fn snapshot(&self, chat: &ChatId) -> Option<SharedState> {
        self.states.read().await.get(chat).cloned()
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn load(&self, chat: &ChatId) -> Result<Option<SharedState>, StoreError> {
        Ok(self.snapshot(chat).await)
    }

    async fn put(&self, chat: &ChatId, state: SharedState) -> Result<(), StoreError> {
        self.states.write().await.insert(chat.clone(), state);
        Ok(())
    }
}
