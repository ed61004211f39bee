//! Error types shared across the HIE registry crate.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while talking to the HIE API or preparing requests for it.
///
/// The license evaluator never produces these: malformed license data
/// degrades to "expired" instead of failing.
#[derive(Debug, Error)]
pub enum HieError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The HIE API answered with a non-success status.
    #[error("HIE API returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode HIE response: {0}")]
    Decode(String),

    /// The HIE API answered successfully but reported an error in the body.
    #[error("HIE API error: {0}")]
    Api(String),

    /// A request payload failed local validation before being sent.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HieError {
    /// HTTP status code, when the error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            HieError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for a user-facing notification.
    ///
    /// Prefers the server-provided message so callers can surface it
    /// as-is, falling back to the full error text.
    pub fn user_message(&self) -> String {
        match self {
            HieError::Http { message, .. } if !message.is_empty() => message.clone(),
            HieError::Api(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for HieError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            HieError::Decode(err.to_string())
        } else {
            HieError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for HieError {
    fn from(err: serde_json::Error) -> Self {
        HieError::Decode(err.to_string())
    }
}

pub type HieResult<T> = Result<T, HieError>;
