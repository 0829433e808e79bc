use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Fallback used when neither the backend nor the transport said anything useful.
pub const DEFAULT_FAILURE: &str = "Request failed";

/// Fields of an object payload that may carry a human readable message,
/// in priority order.
const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "detail"];

// ── Backend call errors ───────────────────────────────────────────────────────

/// Where the normalized message of an [`ApiError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    Payload,
    Transport,
    Default,
}

/// Coarse classification of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// No HTTP response at all (status 0).
    Transport,
    Client,
    Server,
    Unknown,
}

/// A failed backend call, normalized into one shape regardless of how the
/// backend chose to report it.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, `Some(0)` when the request never got a response.
    pub status: Option<u16>,
    pub message: String,
    /// The original error payload, `Value::Null` when there was none.
    #[serde(rename = "error")]
    pub payload: Value,
    #[serde(skip)]
    pub origin: MessageOrigin,
}

impl ApiError {
    /// Build a normalized error from whatever the failed call produced.
    ///
    /// A non-blank string payload wins verbatim; an object payload is searched
    /// for `message`, `error` and `detail` in that order; then the transport
    /// message; then [`DEFAULT_FAILURE`].
    pub fn normalize(status: Option<u16>, payload: Value, transport: Option<&str>) -> Self {
        let (message, origin) = match payload_message(&payload) {
            Some(m) => (m.to_string(), MessageOrigin::Payload),
            None => match transport.filter(|t| !t.trim().is_empty()) {
                Some(t) => (t.to_string(), MessageOrigin::Transport),
                None => (DEFAULT_FAILURE.to_string(), MessageOrigin::Default),
            },
        };

        Self {
            status,
            message,
            payload,
            origin,
        }
    }

    /// Request never reached the backend or the connection dropped.
    pub fn transport(err: &reqwest::Error) -> Self {
        Self::normalize(Some(0), Value::Null, Some(&err.to_string()))
    }

    /// Backend answered with a non-success status. `body` is the raw response
    /// text; JSON bodies are kept structured, anything else as a string.
    /// `reason` is the status line's reason phrase, used when the body says nothing.
    pub fn from_response(status: u16, reason: Option<&str>, body: &str) -> Self {
        Self::normalize(Some(status), parse_payload(body), reason)
    }

    /// Successful status but the body did not decode into the expected type.
    pub fn decode(status: u16, err: &serde_json::Error) -> Self {
        Self::normalize(
            Some(status),
            Value::Null,
            Some(&format!("Invalid response body: {}", err)),
        )
    }

    pub fn class(&self) -> ErrorClass {
        match self.status {
            Some(0) => ErrorClass::Transport,
            Some(400..=499) => ErrorClass::Client,
            Some(500..=599) => ErrorClass::Server,
            _ => ErrorClass::Unknown,
        }
    }
}

fn payload_message(payload: &Value) -> Option<&str> {
    match payload {
        Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
        Value::Object(map) => MESSAGE_FIELDS.iter().find_map(|field| match map.get(*field) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }),
        _ => None,
    }
}

fn parse_payload(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// The one place that turns a failed call into text for the operator.
pub fn display_message(err: &ApiError) -> String {
    let prefix = match err.status {
        Some(code) if code != 0 => format!("Error {}: ", code),
        _ => String::new(),
    };

    if err.origin == MessageOrigin::Payload {
        return format!("{}{}", prefix, err.message);
    }

    match err.status {
        Some(404) => "Product not found. Please check the Product ID and try again.".to_string(),
        Some(400) => "Invalid request. Please check your input and try again.".to_string(),
        Some(500) => "Server error. Please try again later or contact support.".to_string(),
        Some(0) => "Unable to connect to server. Please check your internet connection.".to_string(),
        _ if err.origin == MessageOrigin::Transport => format!("{}{}", prefix, err.message),
        _ if !prefix.is_empty() => format!("{}{}", prefix, DEFAULT_FAILURE),
        _ => "Request failed. Please try again.".to_string(),
    }
}

// ── Console HTTP surface errors ───────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(error = %self, "Rejected console request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
