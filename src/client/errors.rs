//! Extraction of error messages from HIE API error bodies.
//!
//! The HIE is fronted by several services and does not use one error shape.
//! All of these are seen in practice:
//!
//! ```json
//! {"error": {"message": "Practitioner not found", "code": "NOT_FOUND"}}
//! {"error": "Practitioner not found"}
//! {"message": "Practitioner not found"}
//! {"message": {"error": "Practitioner not found"}}
//! ```

use serde::Deserialize;

use crate::errors::HieError;

/// Structured error object, e.g. `{"code": "...", "message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Structured(ServerErrorBody),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum MessageField {
    Text(String),
    Nested { error: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerErrorResponse {
    #[serde(default)]
    error: Option<ErrorField>,
    #[serde(default)]
    message: Option<MessageField>,
}

/// Pull a human-readable message out of an error response body.
///
/// Returns `None` when the body is not JSON or carries no message.
pub fn extract_error_message(body: &str) -> Option<String> {
    let resp: ServerErrorResponse = serde_json::from_str(body).ok()?;

    let from_error = resp.error.map(|e| match e {
        ErrorField::Structured(s) => s.message,
        ErrorField::Text(t) => t,
    });
    let from_message = resp.message.map(|m| match m {
        MessageField::Text(t) => t,
        MessageField::Nested { error } => error,
    });

    from_error
        .or(from_message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
}

/// Build the error for a non-success HTTP response.
///
/// Plain-text bodies are used as the message when short enough to be a
/// message rather than an HTML error page.
pub fn http_error(status: u16, body: &str) -> HieError {
    let message = extract_error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if !trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<') {
            trimmed.to_string()
        } else {
            String::new()
        }
    });
    HieError::Http { status, message }
}
