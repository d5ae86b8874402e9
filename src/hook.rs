//! Render-scoped ambient context
//!
//! The processor builds one [`HookContext`] per render call from the update
//! being dispatched and hands `render` a borrowed [`Hook`]. The borrow ends
//! when `render` returns: views and handlers are `'static`, so a hook cannot
//! be stored in a state, captured by a handler, or read after the render it
//! was created for. Code that needs chat metadata later copies the data out
//! while rendering.

use crate::state::ChatState;
use crate::update::ChatInfo;
use crate::view::View;

/// Data made available to `render`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    chat: ChatInfo,
}

impl HookContext {
    pub fn new(chat: ChatInfo) -> Self {
        Self { chat }
    }

    pub fn chat(&self) -> &ChatInfo {
        &self.chat
    }

    /// Run `f` with a hook that is valid only for the duration of the call.
    pub fn scope<R>(&self, f: impl FnOnce(&Hook<'_>) -> R) -> R {
        let hook = Hook { context: self };
        f(&hook)
    }

    /// Render `state` inside a fresh hook scope.
    pub fn render(&self, state: &dyn ChatState) -> Vec<View> {
        self.scope(|hook| state.render(hook))
    }
}

/// Read-only handle passed to `ChatState::render`
#[derive(Debug)]
pub struct Hook<'scope> {
    context: &'scope HookContext,
}

impl<'scope> Hook<'scope> {
    /// Metadata of the chat being rendered
    pub fn use_chat(&self) -> &'scope ChatInfo {
        &self.context.chat
    }
}
