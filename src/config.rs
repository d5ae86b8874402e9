//! Console host configuration

use crate::error::ConfigError;
use crate::screens::Screen;

/// Settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Screen every new chat starts on
    pub screen: Screen,
    /// User name reported for the console chat
    pub user_name: String,
    /// Whether typing indicators pause output
    pub honor_typing: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            screen: Screen::Contact,
            user_name: "console".to_string(),
            honor_typing: true,
        }
    }
}

impl BotConfig {
    /// # Errors
    ///
    /// Returns an error when a variable is set to an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set to an unrecognized value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let screen = match lookup("CHATSTATE_SCREEN") {
            None => defaults.screen,
            Some(value) => Screen::from_name(value.trim()).ok_or_else(|| ConfigError {
                key: "CHATSTATE_SCREEN",
                reason: format!(
                    "expected one of {}",
                    Screen::ALL.map(Screen::name).join(", ")
                ),
                value,
            })?,
        };

        let user_name = lookup("CHATSTATE_USER")
            .or_else(|| lookup("USER"))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.user_name);

        let honor_typing = match lookup("CHATSTATE_TYPING") {
            None => defaults.honor_typing,
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError {
                key: "CHATSTATE_TYPING",
                value,
                reason: "expected true or false".to_string(),
            })?,
        };

        Ok(Self {
            screen,
            user_name,
            honor_typing,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
