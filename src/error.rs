//! Error types for dispatch

use thiserror::Error;

/// Error returned by a handler future.
///
/// Handlers run application code (network calls, parsing) so any error type
/// is accepted and carried through to the processor's caller unchanged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// State store failure
#[derive(Debug, Error)]
#[error("state store: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound delivery failure reported by a transport adapter
#[derive(Debug, Error)]
#[error("transport: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that abort a single dispatch
#[derive(Debug, Error)]
pub enum DispatchError {
    /// `get` or `put` failed; nothing past the failed step ran
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The matched handler failed; the store was not written
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),
    /// The new state was committed but delivery stopped part way
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl DispatchError {
    /// Whether the store holds the new state despite the failure
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Malformed configuration value
#[derive(Debug, Error)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}
