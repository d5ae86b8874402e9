//! Platform-neutral inbound updates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one independent conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChatId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

/// Platform metadata about the chat an update came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatInfo {
    pub id: ChatId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl ChatInfo {
    pub fn new(id: impl Into<ChatId>) -> Self {
        Self {
            id: id.into(),
            user_name: None,
            first_name: None,
            last_name: None,
        }
    }

    #[must_use]
    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: Option<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = last;
        self
    }

    /// Best human-readable name: user name, then full name, then the chat id.
    pub fn display_name(&self) -> String {
        if let Some(user_name) = &self.user_name {
            return user_name.clone();
        }
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.id.to_string(),
        }
    }
}

/// A shared contact card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Contact {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            first_name: None,
            last_name: None,
            user_id: None,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phone_number)
    }
}

/// What the user did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Free text message
    Text(String),
    /// Press of a button, identified by its label
    ButtonPress(String),
    /// Contact share
    ContactShare(Contact),
}

impl Payload {
    pub fn category(&self) -> UpdateCategory {
        match self {
            Payload::Text(_) => UpdateCategory::Text,
            Payload::ButtonPress(_) => UpdateCategory::ButtonPress,
            Payload::ContactShare(_) => UpdateCategory::ContactShare,
        }
    }
}

/// Trigger category of an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateCategory {
    Text,
    ButtonPress,
    ContactShare,
}

/// One inbound event in the engine's neutral shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    pub chat: ChatInfo,
    pub payload: Payload,
}

impl Update {
    pub fn new(chat: ChatInfo, payload: Payload) -> Self {
        Self { chat, payload }
    }

    pub fn text(chat: ChatInfo, text: impl Into<String>) -> Self {
        Self::new(chat, Payload::Text(text.into()))
    }

    pub fn button(chat: ChatInfo, label: impl Into<String>) -> Self {
        Self::new(chat, Payload::ButtonPress(label.into()))
    }

    pub fn contact(chat: ChatInfo, contact: Contact) -> Self {
        Self::new(chat, Payload::ContactShare(contact))
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat.id
    }

    pub fn category(&self) -> UpdateCategory {
        self.payload.category()
    }
}
