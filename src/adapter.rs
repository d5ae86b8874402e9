//! Transport adapter boundary
//!
//! An adapter converts platform-native events into [`Update`]s and delivers
//! [`Outbound`] messages back to the platform. Messages are sent one call
//! per view, in render order.

use crate::error::TransportError;
use crate::update::{ChatInfo, Update};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Transport-neutral message produced from a rendered view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Outbound {
    Text(String),
    Typing(Duration),
    Keyboard {
        title: String,
        rows: Vec<Vec<String>>,
    },
    ContactRequest {
        prompt: String,
    },
}

/// Bridge between a messaging platform and the processor
#[async_trait]
pub trait ChatAdapter<N>: Send + Sync {
    /// Decode a native event; `None` for events that are not chat updates
    fn to_update(&self, native: N) -> Option<Update>;

    /// Deliver one message to the chat
    async fn send(&self, chat: &ChatInfo, message: Outbound) -> Result<(), TransportError>;
}

#[async_trait]
impl<N, T: ChatAdapter<N> + ?Sized> ChatAdapter<N> for Arc<T> {
    fn to_update(&self, native: N) -> Option<Update> {
        (**self).to_update(native)
    }

    async fn send(&self, chat: &ChatInfo, message: Outbound) -> Result<(), TransportError> {
        (**self).send(chat, message).await
    }
}
