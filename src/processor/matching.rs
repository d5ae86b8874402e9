//! Update-to-view matching

use crate::update::Payload;
use crate::view::{HandlerFuture, View};

/// The handler chosen for an update, already invoked
pub(crate) struct Selected {
    /// Position of the matched view in the render
    pub index: usize,
    pub future: HandlerFuture,
}

/// Whether `view` handles `payload`.
///
/// Keyboards match a press of one of their labels. Text and contact handlers
/// match any update of their category.
pub(crate) fn handles(view: &View, payload: &Payload) -> bool {
    match (view, payload) {
        (View::Buttons(buttons), Payload::ButtonPress(label)) => buttons.contains(label),
        (View::TextHandler(_), Payload::Text(_))
        | (View::ContactHandler { .. }, Payload::ContactShare(_)) => true,
        _ => false,
    }
}

/// Pick the first view that handles `payload` and start its handler.
pub(crate) fn select(views: Vec<View>, payload: Payload) -> Option<Selected> {
    let index = views.iter().position(|view| handles(view, &payload))?;
    let view = views.into_iter().nth(index)?;
    let future = invoke(view, payload)?;
    Some(Selected { index, future })
}

fn invoke(view: View, payload: Payload) -> Option<HandlerFuture> {
    match (view, payload) {
        (View::Buttons(buttons), Payload::ButtonPress(label)) => {
            buttons.take(&label).map(|handler| handler.invoke(()))
        }
        (View::TextHandler(handler), Payload::Text(text)) => Some(handler.invoke(text)),
        (View::ContactHandler { handler, .. }, Payload::ContactShare(contact)) => {
            Some(handler.invoke(contact))
        }
        _ => None,
    }
}
