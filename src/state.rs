//! Chat state abstraction

use crate::hook::Hook;
use crate::update::ChatId;
use crate::view::View;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// One conversational "screen".
///
/// A state is an immutable value. `render` lists the views to display, in
/// display order, and the handlers that produce the next state. It must be a
/// pure function of `self` and the hook: the processor renders before
/// matching an update and again after the transition, and both renders of
/// the same state have to agree.
pub trait ChatState: Any + Debug + Send + Sync {
    fn render(&self, hook: &Hook<'_>) -> Vec<View>;
}

/// A state as held by stores and handlers
pub type SharedState = Arc<dyn ChatState>;

impl dyn ChatState {
    /// Borrow the concrete state if it is a `T`
    pub fn downcast_ref<T: ChatState>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    pub fn is<T: ChatState>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }
}

/// Conversion accepted wherever a handler returns its next state
pub trait IntoState {
    fn into_state(self) -> SharedState;
}

impl<T: ChatState> IntoState for T {
    fn into_state(self) -> SharedState {
        Arc::new(self)
    }
}

impl IntoState for SharedState {
    fn into_state(self) -> SharedState {
        self
    }
}

/// Supplies the starting state for a chat seen for the first time
pub type InitialState = Arc<dyn Fn(&ChatId) -> SharedState + Send + Sync>;

/// Wrap a constructor as an [`InitialState`]
pub fn initial_state<F, S>(f: F) -> InitialState
where
    F: Fn(&ChatId) -> S + Send + Sync + 'static,
    S: IntoState,
{
    Arc::new(move |chat| f(chat).into_state())
}
