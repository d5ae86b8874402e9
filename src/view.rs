//! Declarative views and the handlers bound to them

use crate::adapter::Outbound;
use crate::error::HandlerError;
use crate::state::{IntoState, SharedState};
use crate::update::{Contact, UpdateCategory};
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Outcome of a handler: the next state
pub type HandlerResult = Result<SharedState, HandlerError>;

/// Pending handler computation
pub type HandlerFuture = BoxFuture<'static, HandlerResult>;

/// Callback producing the next state from an update's input.
///
/// Handlers are consumed on invocation; every render builds fresh ones.
pub struct Handler<I> {
    call: Box<dyn FnOnce(I) -> HandlerFuture + Send>,
}

impl<I: 'static> Handler<I> {
    /// Handler computing the next state synchronously
    pub fn new<F, S>(f: F) -> Self
    where
        F: FnOnce(I) -> S + Send + 'static,
        S: IntoState + Send + 'static,
    {
        Self::try_async(move |input| std::future::ready(Ok(f(input))))
    }

    /// Handler awaiting some work before producing the next state
    pub fn from_async<F, Fut, S>(f: F) -> Self
    where
        F: FnOnce(I) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
        S: IntoState + Send + 'static,
    {
        Self::try_async(move |input| f(input).map(Ok))
    }

    /// Handler whose work may fail
    pub fn try_async<F, Fut, S>(f: F) -> Self
    where
        F: FnOnce(I) -> Fut + Send + 'static,
        Fut: Future<Output = Result<S, HandlerError>> + Send + 'static,
        S: IntoState + Send + 'static,
    {
        Self {
            call: Box::new(move |input| {
                f(input)
                    .map(|result| result.map(IntoState::into_state))
                    .boxed()
            }),
        }
    }

    pub fn invoke(self, input: I) -> HandlerFuture {
        (self.call)(input)
    }
}

impl<I> fmt::Debug for Handler<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// One labelled button
#[derive(Debug)]
pub struct Button {
    pub label: String,
    handler: Handler<()>,
}

/// A titled group of buttons, in display order
#[derive(Debug)]
pub struct Buttons {
    pub title: String,
    buttons: Vec<Button>,
    columns: usize,
}

impl Buttons {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            buttons: Vec::new(),
            columns: 1,
        }
    }

    #[must_use]
    pub fn button<F, S>(self, label: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> S + Send + 'static,
        S: IntoState + Send + 'static,
    {
        self.push(label, Handler::new(move |()| f()))
    }

    #[must_use]
    pub fn button_async<F, Fut, S>(self, label: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
        S: IntoState + Send + 'static,
    {
        self.push(label, Handler::from_async(move |()| f()))
    }

    #[must_use]
    pub fn try_button<F, Fut, S>(self, label: impl Into<String>, f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<S, HandlerError>> + Send + 'static,
        S: IntoState + Send + 'static,
    {
        self.push(label, Handler::try_async(move |()| f()))
    }

    /// Buttons per keyboard row; zero is treated as one.
    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    fn push(mut self, label: impl Into<String>, handler: Handler<()>) -> Self {
        self.buttons.push(Button {
            label: label.into(),
            handler,
        });
        self
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buttons.iter().map(|b| b.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    /// Take the handler of the first button labelled `label`
    pub fn take(self, label: &str) -> Option<Handler<()>> {
        self.buttons
            .into_iter()
            .find(|b| b.label == label)
            .map(|b| b.handler)
    }

    /// Labels laid out in keyboard rows
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.buttons
            .chunks(self.columns)
            .map(|row| row.iter().map(|b| b.label.clone()).collect())
            .collect()
    }
}

/// One rendering instruction
#[derive(Debug)]
pub enum View {
    /// Message text; `None` renders nothing
    Text(Option<String>),
    /// Typing indicator shown for a while
    Typing(Duration),
    /// Keyboard whose presses are handled by label
    Buttons(Buttons),
    /// Handles any free-text reply
    TextHandler(Handler<String>),
    /// Asks for a contact and handles the shared card
    ContactHandler {
        prompt: String,
        handler: Handler<Contact>,
    },
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(Some(text.into()))
    }

    pub fn maybe_text<T: Into<String>>(text: Option<T>) -> Self {
        View::Text(text.map(Into::into))
    }

    pub fn typing(duration: Duration) -> Self {
        View::Typing(duration)
    }

    pub fn buttons(buttons: Buttons) -> Self {
        View::Buttons(buttons)
    }

    pub fn text_handler<F, S>(f: F) -> Self
    where
        F: FnOnce(String) -> S + Send + 'static,
        S: IntoState + Send + 'static,
    {
        View::TextHandler(Handler::new(f))
    }

    pub fn text_handler_async<F, Fut, S>(f: F) -> Self
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = S> + Send + 'static,
        S: IntoState + Send + 'static,
    {
        View::TextHandler(Handler::from_async(f))
    }

    pub fn contact_handler<F, S>(prompt: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(Contact) -> S + Send + 'static,
        S: IntoState + Send + 'static,
    {
        View::ContactHandler {
            prompt: prompt.into(),
            handler: Handler::new(f),
        }
    }

    /// Update category this view reacts to, if any
    pub fn trigger(&self) -> Option<UpdateCategory> {
        match self {
            View::Text(_) | View::Typing(_) => None,
            View::Buttons(_) => Some(UpdateCategory::ButtonPress),
            View::TextHandler(_) => Some(UpdateCategory::Text),
            View::ContactHandler { .. } => Some(UpdateCategory::ContactShare),
        }
    }

    /// Transport message for this view; `None` when nothing is shown.
    pub fn outbound(&self) -> Option<Outbound> {
        match self {
            View::Text(Some(text)) if !text.is_empty() => Some(Outbound::Text(text.clone())),
            View::Text(_) | View::TextHandler(_) => None,
            View::Typing(duration) => Some(Outbound::Typing(*duration)),
            View::Buttons(buttons) => Some(Outbound::Keyboard {
                title: buttons.title.clone(),
                rows: buttons.rows(),
            }),
            View::ContactHandler { prompt, .. } => Some(Outbound::ContactRequest {
                prompt: prompt.clone(),
            }),
        }
    }
}

/// Structural equality; handler closures are not compared.
impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (View::Text(a), View::Text(b)) => a == b,
            (View::Typing(a), View::Typing(b)) => a == b,
            (View::Buttons(a), View::Buttons(b)) => {
                a.title == b.title && a.columns == b.columns && a.labels().eq(b.labels())
            }
            (View::TextHandler(_), View::TextHandler(_)) => true,
            (View::ContactHandler { prompt: a, .. }, View::ContactHandler { prompt: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::Hook;
    use crate::state::ChatState;

    #[derive(Debug, PartialEq)]
    struct Done(&'static str);

    impl ChatState for Done {
        fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
            vec![View::text(self.0)]
        }
    }

    #[test]
    fn absent_and_empty_text_lower_to_nothing() {
        assert_eq!(View::Text(None).outbound(), None);
        assert_eq!(View::text("").outbound(), None);
        assert_eq!(View::text_handler(|_| Done("x")).outbound(), None);
        assert_eq!(
            View::maybe_text(Some("hi")).outbound(),
            Some(Outbound::Text("hi".into()))
        );
    }

    #[test]
    fn buttons_lower_to_rows() {
        let view = View::buttons(
            Buttons::new("Pick")
                .button("a", || Done("a"))
                .button("b", || Done("b"))
                .button("c", || Done("c"))
                .columns(2),
        );
        assert_eq!(
            view.outbound(),
            Some(Outbound::Keyboard {
                title: "Pick".into(),
                rows: vec![vec!["a".into(), "b".into()], vec!["c".into()]],
            })
        );
    }

    #[test]
    fn structural_equality_ignores_handlers() {
        let a = View::buttons(Buttons::new("T").button("x", || Done("1")));
        let b = View::buttons(Buttons::new("T").button("x", || Done("2")));
        let c = View::buttons(Buttons::new("T").button("y", || Done("1")));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(View::text("x"), View::Text(None));
        assert_ne!(
            View::contact_handler("share", |_| Done("1")),
            View::contact_handler("other", |_| Done("1"))
        );
    }

    #[test]
    fn take_returns_first_button_with_label() {
        let buttons = Buttons::new("T")
            .button("dup", || Done("first"))
            .button("dup", || Done("second"));
        assert!(buttons.contains("dup"));
        assert_eq!(buttons.len(), 2);
        assert!(buttons.take("missing").is_none());
    }

    #[tokio::test]
    async fn duplicate_label_invokes_first_handler() {
        let buttons = Buttons::new("T")
            .button("dup", || Done("first"))
            .button("dup", || Done("second"));
        let next = buttons.take("dup").unwrap().invoke(()).await.unwrap();
        assert_eq!(next.downcast_ref::<Done>(), Some(&Done("first")));
    }

    #[tokio::test]
    async fn async_and_fallible_handlers_resolve() {
        let ok = Handler::from_async(|text: String| async move {
            tokio::task::yield_now().await;
            Done(if text == "a" { "was a" } else { "other" })
        });
        let next = ok.invoke("a".to_string()).await.unwrap();
        assert_eq!(next.downcast_ref::<Done>(), Some(&Done("was a")));

        let failing = Handler::try_async(|()| async { Err::<Done, HandlerError>("nope".into()) });
        let err = failing.invoke(()).await.unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }

    #[test]
    fn triggers_by_variant() {
        assert_eq!(View::typing(Duration::from_secs(1)).trigger(), None);
        assert_eq!(
            View::text_handler(|_| Done("x")).trigger(),
            Some(UpdateCategory::Text)
        );
        assert_eq!(
            View::contact_handler("p", |_| Done("x")).trigger(),
            Some(UpdateCategory::ContactShare)
        );
        assert_eq!(
            View::buttons(Buttons::new("t")).trigger(),
            Some(UpdateCategory::ButtonPress)
        );
    }
}
