//! Mock implementations for testing
//!
//! An adapter recording everything it is asked to send and a store whose
//! operations can be made to fail.

use crate::adapter::{ChatAdapter, Outbound};
use crate::error::{StoreError, TransportError};
use crate::state::SharedState;
use crate::store::{InMemoryStore, StateStore};
use crate::update::{ChatId, ChatInfo, Update};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// Recording Adapter
// ============================================================================

/// Adapter over neutral updates that records deliveries
pub struct RecordingAdapter {
    sent: Mutex<Vec<(ChatId, Outbound)>>,
    fail_after: Option<usize>,
}

impl RecordingAdapter {
    /// Updates from this chat are rejected by `to_update`
    pub const IGNORED_CHAT: &'static str = "ignored";

    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_after: None,
        }
    }

    /// Fail every send once `n` messages were delivered
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn messages(&self) -> Vec<(ChatId, Outbound)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages_for(&self, chat: &ChatId) -> Vec<Outbound> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == chat)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Default for RecordingAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatAdapter<Update> for RecordingAdapter {
    fn to_update(&self, native: Update) -> Option<Update> {
        (native.chat_id().as_str() != Self::IGNORED_CHAT).then_some(native)
    }

    async fn send(&self, chat: &ChatInfo, message: Outbound) -> Result<(), TransportError> {
        let mut sent = self.sent.lock().unwrap();
        if self.fail_after.is_some_and(|n| sent.len() >= n) {
            return Err(TransportError::new("connection reset"));
        }
        sent.push((chat.id.clone(), message));
        Ok(())
    }
}

// ============================================================================
// Flaky Store
// ============================================================================

/// In-memory store with switchable failures
#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    fail_load: AtomicBool,
    fail_put: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_load(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn fail_put(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

#[async_trait]
impl StateStore for FlakyStore {
    async fn load(&self, chat: &ChatId) -> Result<Option<SharedState>, StoreError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(StoreError::new("read timed out"));
        }
        self.inner.load(chat).await
    }

    async fn put(&self, chat: &ChatId, state: SharedState) -> Result<(), StoreError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(StoreError::new("write rejected"));
        }
        self.inner.put(chat, state).await
    }
}
