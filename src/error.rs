//! Application Errors
//!
//! One error type for everything a screen can run into: local validation,
//! transport and server failures, browser storage and external resources.

use leptos_listkit::{ServerMessage, ValidationError, FALLBACK_ERROR};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Caught before anything was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    /// The response body did not match the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Browser storage missing or refused the operation
    #[error("storage error: {0}")]
    Storage(String),
    /// A required external resource (script, payment session) is unavailable
    #[error("{0}")]
    External(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Error bodies the API sends; either key may be used
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl AppError {
    /// Build a server error from a status and the raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty());
        AppError::Server { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Server { status: 401, .. })
    }

    /// Text for a notification: the server's words when it gave any
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or_else(|| match self {
            AppError::Network(_) => "Unable to reach the server. Check your connection.".to_string(),
            _ => FALLBACK_ERROR.to_string(),
        })
    }
}

impl ServerMessage for AppError {
    fn server_message(&self) -> Option<String> {
        match self {
            AppError::Server { message, .. } => message.clone(),
            AppError::Validation(err) => Some(err.to_string()),
            AppError::External(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<wasm_bindgen::JsValue> for AppError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        AppError::External(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key() {
        let err = AppError::from_response(409, r#"{"message":"Course already exists"}"#);
        assert_eq!(
            err,
            AppError::Server {
                status: 409,
                message: Some("Course already exists".into())
            }
        );
        assert_eq!(err.user_message(), "Course already exists");
    }

    #[test]
    fn test_error_key() {
        let err = AppError::from_response(400, r#"{"error":"Invalid price"}"#);
        assert_eq!(err.user_message(), "Invalid price");
    }

    #[test]
    fn test_fallback_for_unreadable_body() {
        let err = AppError::from_response(500, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message(), FALLBACK_ERROR);
        assert!(err.to_string().contains("500"));

        let blank = AppError::from_response(500, r#"{"message":"  "}"#);
        assert_eq!(blank.server_message(), None);
    }

    #[test]
    fn test_validation_text_passes_through() {
        let err: AppError = ValidationError::Missing("Title").into();
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn test_unauthorized() {
        assert!(AppError::from_response(401, "{}").is_unauthorized());
        assert!(!AppError::Network("offline".into()).is_unauthorized());
    }
}
