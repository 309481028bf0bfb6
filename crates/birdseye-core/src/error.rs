//! Error types for the birdseye toolkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, server, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for birdseye operations.
///
/// This error type covers all possible failure modes in the toolkit,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected login, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success HTTP responses from the server.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Input validation errors (missing required fields, invalid URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// Transport-level errors: the request never produced a response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP transport error (protocol, body decode).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login call failed with an HTTP error status.
    #[error("login rejected (HTTP {status})")]
    LoginFailed {
        status: u16,
        message: Option<String>,
    },

    /// The login response did not contain an access token.
    #[error("login response did not contain an access token")]
    MissingAccessToken,

    /// The session was rejected with 401 and could not be recovered.
    #[error("session expired")]
    SessionExpired,

    /// No refresh token is held, or the server rejected it.
    #[error("refresh token invalid")]
    RefreshTokenInvalid,
}

/// A non-success HTTP status from the server, with the response body
/// when one could be read.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Response body, when it parsed as JSON.
    pub body: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }

    /// The server-provided `message` field, if the body carries one.
    pub fn message(&self) -> Option<&str> {
        self.body.as_ref()?.get("message")?.as_str()
    }

    /// Whether this is an authentication failure the session layer may
    /// recover from.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Input validation errors. No network call is made when these are raised.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is absent from a create payload.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// Invalid server base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_display_with_message() {
        let err = ApiError::new(422, Some(json!({"message": "Invalid payload"})));
        assert_eq!(err.to_string(), "HTTP 422: Invalid payload");
    }

    #[test]
    fn api_error_display_without_body() {
        let err = ApiError::new(503, None);
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[test]
    fn only_401_is_recoverable() {
        assert!(ApiError::new(401, None).is_auth_error());
        assert!(!ApiError::new(403, None).is_auth_error());
    }
}
