//! Per-chat mutual exclusion

use crate::update::ChatId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OwnedMutexGuard;

type ChatLock = Arc<tokio::sync::Mutex<()>>;

/// One async lock per chat with a dispatch in flight.
///
/// Entries are created on demand and removed when the last holder or waiter
/// is gone, so the table only contains busy chats.
#[derive(Default)]
pub(crate) struct ChatLocks {
    entries: Mutex<HashMap<ChatId, ChatLock>>,
}

impl ChatLocks {
    /// Wait until no other dispatch holds `chat`
    pub async fn acquire(&self, chat: &ChatId) -> ChatGuard<'_> {
        let lock = Arc::clone(self.entries().entry(chat.clone()).or_default());
        let guard = lock.lock_owned().await;
        ChatGuard {
            locks: self,
            chat: chat.clone(),
            guard: Some(guard),
        }
    }

    /// Chats currently locked or waited on
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ChatId, ChatLock>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to one chat until dropped
pub(crate) struct ChatGuard<'a> {
    locks: &'a ChatLocks,
    chat: ChatId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ChatGuard<'_> {
    fn drop(&mut self) {
        // Waiters clone the lock under the table mutex, so with the table
        // held a count of one means the table is the only owner left.
        let mut entries = self.locks.entries();
        drop(self.guard.take());
        if entries
            .get(&self.chat)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            entries.remove(&self.chat);
        }
    }
}
