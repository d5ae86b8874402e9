//! chatstate - declarative conversation state engine for chat bots
//!
//! A chat's current screen is an immutable [`ChatState`] whose render lists
//! [`View`]s: texts, typing indicators, keyboards and reply handlers. The
//! [`Processor`] feeds each [`Update`] to the first view that handles it,
//! stores the state the handler returns and delivers its render through a
//! [`ChatAdapter`].

#![allow(clippy::must_use_candidate)]

pub mod adapter;
pub mod config;
pub mod console;
pub mod error;
pub mod hook;
pub mod processor;
pub mod screens;
pub mod state;
pub mod store;
pub mod update;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{ChatAdapter, Outbound};
pub use error::{DispatchError, HandlerError, StoreError, TransportError};
pub use hook::{Hook, HookContext};
pub use processor::{Dispatch, Processor};
pub use state::{initial_state, ChatState, InitialState, IntoState, SharedState};
pub use store::{InMemoryStore, StateStore};
pub use update::{ChatId, ChatInfo, Contact, Payload, Update, UpdateCategory};
pub use view::{Buttons, Handler, View};
