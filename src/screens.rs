//! Sample screens
//!
//! Small conversations showing each kind of view. The console host starts
//! from one of them, picked by configuration.

use crate::hook::Hook;
use crate::state::{ChatState, IntoState, SharedState};
use crate::view::{Buttons, View};
use std::time::Duration;

/// Asks for a name and echoes it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetNameState;

impl ChatState for GetNameState {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        vec![
            View::text("What is your name?"),
            View::text_handler(PrintState::new),
        ]
    }
}

/// Shows a fixed text and handles nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintState {
    pub text: String,
}

impl PrintState {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ChatState for PrintState {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        vec![View::text(self.text.clone())]
    }
}

/// Counter driven by a keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterState {
    pub counter: i64,
    pub step: i64,
    pub reply: Option<String>,
}

impl Default for CounterState {
    fn default() -> Self {
        Self {
            counter: 0,
            step: 1,
            reply: None,
        }
    }
}

impl CounterState {
    pub fn new(counter: i64, step: i64, reply: Option<String>) -> Self {
        Self {
            counter,
            step,
            reply,
        }
    }

    fn change_counter(&self, delta: i64) -> Self {
        Self {
            counter: self.counter + delta,
            reply: Some(format!("Counter changed: {delta}")),
            ..self.clone()
        }
    }

    fn set_step(&self, step: i64) -> Self {
        Self {
            step,
            reply: Some(format!("Step changed to: {step}")),
            ..self.clone()
        }
    }

    fn with_reply(&self, reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..self.clone()
        }
    }
}

impl ChatState for CounterState {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        let step = self.step;
        let (inc, dec, one, five, ten, text) = (
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
            self.clone(),
        );

        vec![
            View::maybe_text(self.reply.clone()),
            View::buttons(
                Buttons::new(format!("Counter: {}", self.counter))
                    .button(format!("Increment by {step}"), move || inc.change_counter(step))
                    .button(format!("Decrement by {step}"), move || dec.change_counter(-step))
                    .button("Step = 1", move || one.set_step(1))
                    .button("Step = 5", move || five.set_step(5))
                    .button("Step = 10", move || ten.set_step(10)),
            ),
            View::text_handler(move |_| text.with_reply("Please use buttons")),
        ]
    }
}

/// Two keyboards sharing the same labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManyKeyboards {
    pub log: Option<String>,
}

impl ManyKeyboards {
    fn logged(entry: &str) -> Self {
        Self {
            log: Some(entry.to_string()),
        }
    }

    fn keyboard(name: &'static str) -> View {
        View::buttons(
            Buttons::new(name)
                .button("Button 1", move || Self::logged(&format!("{name}:Button 1")))
                .button("Button 2", move || Self::logged(&format!("{name}:Button 2"))),
        )
    }
}

impl ChatState for ManyKeyboards {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        vec![
            View::maybe_text(self.log.clone()),
            Self::keyboard("First"),
            Self::keyboard("Second"),
        ]
    }
}

/// Greets the user by name read from the hook
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHookState;

impl ChatState for ChatHookState {
    fn render(&self, hook: &Hook<'_>) -> Vec<View> {
        let chat = hook.use_chat();
        vec![
            View::typing(Duration::from_secs(1)),
            View::text(format!("Hello {}", chat.display_name())),
        ]
    }
}

/// Waits for a contact share
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactState;

impl ChatState for ContactState {
    fn render(&self, _hook: &Hook<'_>) -> Vec<View> {
        vec![View::contact_handler("Please share you contact", |contact| {
            PrintState::new(contact.to_string())
        })]
    }
}

/// Screen names accepted by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Counter,
    Name,
    Keyboards,
    Hook,
    Contact,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Counter,
        Screen::Name,
        Screen::Keyboards,
        Screen::Hook,
        Screen::Contact,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Screen::Counter => "counter",
            Screen::Name => "name",
            Screen::Keyboards => "keyboards",
            Screen::Hook => "hook",
            Screen::Contact => "contact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Fresh starting state for this screen
    pub fn initial(self) -> SharedState {
        match self {
            Screen::Counter => CounterState::default().into_state(),
            Screen::Name => GetNameState.into_state(),
            Screen::Keyboards => ManyKeyboards::default().into_state(),
            Screen::Hook => ChatHookState.into_state(),
            Screen::Contact => ContactState.into_state(),
        }
    }
}
