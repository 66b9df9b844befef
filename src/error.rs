//! Client Error Types
//!
//! One taxonomy for every failure a view can run into, with the
//! user-visible treatment each kind gets.

use thiserror::Error;

/// Message shown when the server gave us nothing better.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Message the API sends when the session cookie is missing or expired
pub const LOGIN_REQUIRED: &str = "Login To Continue";

/// Errors surfaced by the API client and the view flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Client-side validation failed; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Network or transport failure (connect, timeout, aborted request)
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-success status with a server-provided message
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// How a view presents an error to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTreatment {
    /// Replace the whole view with an error page and a way back
    FullPage,
    /// Dismissible banner next to the control that failed
    Inline,
    /// Drop the local session and send the user to the login form
    SignIn,
}

impl ClientError {
    /// Map a non-success HTTP status and its body text to an error kind.
    ///
    /// The body may be a `{"message": ...}` JSON object or plain text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = server_message(body);

        match status {
            404 => ClientError::NotFound(message.unwrap_or_else(|| "Not found".to_string())),
            401 | 403 => {
                ClientError::Unauthorized(message.unwrap_or_else(|| LOGIN_REQUIRED.to_string()))
            }
            // The API answers a request without a valid session cookie with 400
            400 if message.as_deref().is_some_and(is_login_required) => {
                ClientError::Unauthorized(message.unwrap_or_default())
            }
            _ => ClientError::Server {
                status,
                message: message.unwrap_or_default(),
            },
        }
    }

    /// Treatment policy for this error kind
    pub fn treatment(&self) -> ErrorTreatment {
        match self {
            ClientError::NotFound(_) => ErrorTreatment::FullPage,
            ClientError::Unauthorized(_) => ErrorTreatment::SignIn,
            ClientError::Validation(_)
            | ClientError::Transport(_)
            | ClientError::Server { .. }
            | ClientError::Decode(_) => ErrorTreatment::Inline,
        }
    }

    /// Text to show the user: the server message when there is one
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_FAILURE)
    }

    /// Like [`user_message`](Self::user_message) with a caller-chosen fallback
    pub fn user_message_or(&self, fallback: &str) -> String {
        let message = match self {
            ClientError::NotFound(m)
            | ClientError::Unauthorized(m)
            | ClientError::Validation(m) => m.as_str(),
            ClientError::Server { message, .. } => message.as_str(),
            ClientError::Transport(_) | ClientError::Decode(_) => "",
        };

        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message.to_string()
        }
    }
}

fn is_login_required(message: &str) -> bool {
    message.trim().eq_ignore_ascii_case(LOGIN_REQUIRED)
}

/// Extract the human-readable message from an error body
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Ok(serde_json::Value::String(s)) => Some(s),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
