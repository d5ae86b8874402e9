//! Property-based tests for rendering and matching
//!
//! These tests verify key invariants hold across arbitrary view lists.

use super::matching::select;
use crate::adapter::Outbound;
use crate::hook::{Hook, HookContext};
use crate::state::ChatState;
use crate::update::{ChatInfo, Contact, Payload};
use crate::view::{Buttons, View};
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Test States
// ============================================================================

/// Blueprint for one view
#[derive(Debug, Clone)]
enum Plan {
    Text(Option<String>),
    Typing(u64),
    Keyboard { title: String, labels: Vec<String> },
    TextReply,
    ContactPrompt(String),
}

/// Renders its plans; every handler reports which view it belonged to
#[derive(Debug)]
struct Scripted(Vec<Plan>);

#[derive(Debug, PartialEq)]
struct Picked {
    index: usize,
    label: Option<String>,
}

impl ChatState for Picked {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        Vec::new()
    }
}

impl ChatState for Scripted {
    fn render(&self, hook: &Hook<'_>) -> Vec<View> {
        let name = hook.use_chat().display_name();
        self.0
            .iter()
            .enumerate()
            .map(|(index, plan)| match plan {
                Plan::Text(text) => View::maybe_text(text.as_ref().map(|t| format!("{name}:{t}"))),
                Plan::Typing(ms) => View::typing(Duration::from_millis(*ms)),
                Plan::Keyboard { title, labels } => {
                    View::buttons(labels.iter().fold(Buttons::new(title.clone()), |b, label| {
                        let label = label.clone();
                        b.button(label.clone(), move || Picked {
                            index,
                            label: Some(label),
                        })
                    }))
                }
                Plan::TextReply => View::text_handler(move |_| Picked { index, label: None }),
                Plan::ContactPrompt(prompt) => {
                    View::contact_handler(prompt.clone(), move |_| Picked { index, label: None })
                }
            })
            .collect()
    }
}

/// Reference matcher written directly against the plans
fn expected_index(plans: &[Plan], payload: &Payload) -> Option<usize> {
    plans.iter().position(|plan| match (plan, payload) {
        (Plan::Keyboard { labels, .. }, Payload::ButtonPress(label)) => labels.contains(label),
        (Plan::TextReply, Payload::Text(_))
        | (Plan::ContactPrompt(_), Payload::ContactShare(_)) => true,
        _ => false,
    })
}

fn context() -> HookContext {
    HookContext::new(ChatInfo::new("prop").with_user_name("tester"))
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_label() -> impl Strategy<Value = String> {
    "[a-c]"
}

fn arb_plan() -> impl Strategy<Value = Plan> {
    prop_oneof![
        proptest::option::of("[a-z]{0,8}").prop_map(Plan::Text),
        (0u64..2000).prop_map(Plan::Typing),
        ("[A-Z]{1,5}", proptest::collection::vec(arb_label(), 0..4))
            .prop_map(|(title, labels)| Plan::Keyboard { title, labels }),
        Just(Plan::TextReply),
        "[a-z ]{1,12}".prop_map(Plan::ContactPrompt),
    ]
}

fn arb_payload() -> impl Strategy<Value = Payload> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(Payload::Text),
        arb_label().prop_map(Payload::ButtonPress),
        "\\+[0-9]{3,8}".prop_map(|phone| Payload::ContactShare(Contact::new(phone))),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Rendering the same state in the same context twice agrees
    #[test]
    fn prop_render_is_deterministic(plans in proptest::collection::vec(arb_plan(), 0..8)) {
        let state = Scripted(plans);
        let first = context().render(&state);
        let second = context().render(&state);
        prop_assert_eq!(first, second);
    }

    // The handler of the first capable view runs, and only that one
    #[test]
    fn prop_first_match_wins(
        plans in proptest::collection::vec(arb_plan(), 0..8),
        payload in arb_payload()
    ) {
        let expected = expected_index(&plans, &payload);
        let pressed = match &payload {
            Payload::ButtonPress(label) => Some(label.clone()),
            _ => None,
        };
        let views = context().render(&Scripted(plans));

        match select(views, payload) {
            None => prop_assert_eq!(expected, None),
            Some(selected) => {
                prop_assert_eq!(Some(selected.index), expected);
                let next = futures::executor::block_on(selected.future).unwrap();
                let picked = next.downcast_ref::<Picked>().unwrap();
                prop_assert_eq!(picked, &Picked { index: selected.index, label: pressed });
            }
        }
    }

    // Lowering keeps order and never emits an empty text
    #[test]
    fn prop_lowering_skips_only_silent_views(plans in proptest::collection::vec(arb_plan(), 0..8)) {
        let views = context().render(&Scripted(plans));
        let silent = views
            .iter()
            .filter(|v| match v {
                View::Text(text) => text.as_deref().is_none_or(str::is_empty),
                View::TextHandler(_) => true,
                _ => false,
            })
            .count();
        let outbound: Vec<Outbound> = views.iter().filter_map(View::outbound).collect();

        prop_assert_eq!(outbound.len() + silent, views.len());
        prop_assert!(outbound.iter().all(|m| !matches!(m, Outbound::Text(t) if t.is_empty())));
    }
}
