//! Error types for the casedesk library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, backend, session, storage and input validation errors.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// The unified error type for casedesk operations.
///
/// Callers that only need something to show the user can reach for
/// [`Error::user_message`]; everything else can match on the variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, undecodable body).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success responses from the backend.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session errors (missing tokens, failed renewal).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Credential store failures.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (bad URL, bad configuration value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the backend's own message if it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Api(err) => err
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            Error::Auth(AuthError::RenewalFailed { source }) => source.user_message(fallback),
            _ => fallback.to_string(),
        }
    }

    /// Returns the API error if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True for an HTTP 401 coming straight from the backend.
    pub fn is_unauthorized(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_unauthorized)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl TransportError {
    /// Classify a reqwest error, recording the configured timeout if it fired.
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

/// A non-success response from the backend.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// The `detail` message from the response body, if any.
    pub detail: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Maximum length for a detail message lifted from an error body.
const MAX_DETAIL_LENGTH: usize = 500;

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Build an error from a status code and a raw response body.
    ///
    /// The backend reports errors as `{"detail": "..."}`, or as a list of
    /// `{"msg": "..."}` objects for request validation failures.
    pub fn from_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| detail_message(value.get("detail")?))
            .map(|detail| truncate(&detail));
        Self::new(status, detail)
    }

    /// The backend's message, if it sent one.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// HTTP 401: the access token is missing, expired or invalid.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// HTTP 403: authenticated but not allowed.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }
}

fn detail_message(detail: &serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn truncate(detail: &str) -> String {
    if detail.len() <= MAX_DETAIL_LENGTH {
        return detail.to_string();
    }
    let mut end = MAX_DETAIL_LENGTH;
    while !detail.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &detail[..end])
}

/// Session-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The operation needs an access token and none is held.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Renewal was requested but no refresh token is held.
    #[error("no refresh token")]
    NoRefreshToken,

    /// Exchanging the refresh token failed; the session has been torn down.
    #[error("token renewal failed: {source}")]
    RenewalFailed {
        #[source]
        source: Box<Error>,
    },
}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// The backing file exists but does not hold a JSON object of strings.
    #[error("corrupt credential file {}: {message}", .path.display())]
    Corrupt { path: PathBuf, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid configuration value.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Config {
        name: String,
        value: String,
        reason: String,
    },

    /// Query parameters that cannot be flattened into `key=value` pairs.
    #[error("invalid query parameters: {message}")]
    Query { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
