//! Update dispatch
//!
//! One dispatch loads the chat's state, renders it, hands the update to the
//! first view able to handle it, stores the state the handler returns and
//! delivers that state's render. Dispatches for the same chat run one at a
//! time; different chats never wait on each other.

mod locks;
mod matching;

#[cfg(test)]
mod proptests;

use crate::adapter::{ChatAdapter, Outbound};
use crate::error::DispatchError;
use crate::hook::HookContext;
use crate::state::{ChatState, InitialState};
use crate::store::StateStore;
use crate::update::{ChatInfo, Update};
use crate::view::View;
use locks::ChatLocks;
use std::marker::PhantomData;
use std::sync::Arc;

/// What a dispatch did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The native event was not a chat update
    Ignored,
    /// No view handled the update; nothing changed
    Dropped,
    /// The handler of view `index` ran and its state was stored
    Transitioned { index: usize, delivered: usize },
}

impl Dispatch {
    pub fn is_transition(self) -> bool {
        matches!(self, Dispatch::Transitioned { .. })
    }
}

/// Drives chats from updates of native type `N`
pub struct Processor<S, A, N> {
    store: S,
    adapter: A,
    initial: InitialState,
    locks: ChatLocks,
    _native: PhantomData<fn(N)>,
}

impl<S, A, N> Processor<S, A, N>
where
    S: StateStore,
    A: ChatAdapter<N>,
{
    pub fn new(store: S, adapter: A, initial: InitialState) -> Self {
        Self {
            store,
            adapter,
            initial,
            locks: ChatLocks::default(),
            _native: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Chats with a dispatch running or queued
    pub fn busy_chats(&self) -> usize {
        self.locks.len()
    }

    /// Decode a native event through the adapter and dispatch it.
    ///
    /// # Errors
    ///
    /// See [`Processor::dispatch`].
    pub async fn handle(&self, native: N) -> Result<Dispatch, DispatchError> {
        match self.adapter.to_update(native) {
            Some(update) => self.dispatch(update).await,
            None => {
                tracing::debug!("Native event is not a chat update, ignoring");
                Ok(Dispatch::Ignored)
            }
        }
    }

    /// Run one update through its chat.
    ///
    /// # Errors
    ///
    /// A store failure aborts at the failed step. A handler failure leaves
    /// the store untouched. A transport failure happens after the new state
    /// was stored.
    pub async fn dispatch(&self, update: Update) -> Result<Dispatch, DispatchError> {
        let Update { chat, payload } = update;
        let category = payload.category();
        let _guard = self.locks.acquire(&chat.id).await;

        let hook = HookContext::new(chat);
        let chat = hook.chat();
        let state = self.store.get(&chat.id, &self.initial).await?;
        let views = hook.render(&*state);
        tracing::debug!(
            chat_id = %chat.id,
            ?category,
            state = ?state,
            views = views.len(),
            "Rendered current state"
        );

        let Some(selected) = matching::select(views, payload) else {
            tracing::debug!(chat_id = %chat.id, ?category, "No view handles update, dropping");
            return Ok(Dispatch::Dropped);
        };
        let index = selected.index;

        let next = selected.future.await.map_err(|e| {
            tracing::debug!(chat_id = %chat.id, index, error = %e, "Handler failed");
            DispatchError::Handler(e)
        })?;
        self.store.put(&chat.id, Arc::clone(&next)).await?;
        tracing::info!(
            chat_id = %chat.id,
            ?category,
            index,
            from = ?state,
            to = ?next,
            "Chat state changed"
        );

        let delivered = self.deliver(&hook, &*next).await?;
        Ok(Dispatch::Transitioned { index, delivered })
    }

    /// Deliver the chat's current render without an update.
    ///
    /// Used to greet a chat before its first message. Returns the number of
    /// messages sent.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read or delivery fails.
    pub async fn start(&self, chat: ChatInfo) -> Result<usize, DispatchError> {
        let _guard = self.locks.acquire(&chat.id).await;
        let hook = HookContext::new(chat);
        let state = self.store.get(&hook.chat().id, &self.initial).await?;
        self.deliver(&hook, &*state).await
    }

    async fn deliver(
        &self,
        hook: &HookContext,
        state: &dyn ChatState,
    ) -> Result<usize, DispatchError> {
        let outbound: Vec<Outbound> = hook
            .render(state)
            .iter()
            .filter_map(View::outbound)
            .collect();
        let count = outbound.len();
        for message in outbound {
            self.adapter.send(hook.chat(), message).await?;
        }
        tracing::debug!(chat_id = %hook.chat().id, count, "Delivered render");
        Ok(count)
    }
}
