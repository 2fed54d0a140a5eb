//! Error types for the Freshgate MCP server.
//!
//! Two layers live here:
//!
//! - [`ClassifiedError`] is what the request orchestrator produces for every
//!   failed attempt. It carries one of eight [`ErrorKind`]s, a message, the
//!   HTTP status when one was received, and an optional retry-after hint.
//! - [`GatewayError`] is the crate-wide error returned by facades and the
//!   tool shell. It wraps classified API failures next to errors that never
//!   reach the transport (configuration, access denial, input validation).
//!
//! # Security
//!
//! Messages built from remote responses may echo request data. Use
//! [`GatewayError::sanitize_message`] before logging or returning them so the
//! API key never leaks.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::access::DenyReason;

/// Maximum length for remote error bodies kept in messages.
pub const MAX_ERROR_BODY_LEN: usize = 500;

/// The fixed taxonomy every failure is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credential rejected (HTTP 401).
    Authentication,
    /// Credential valid but not allowed (HTTP 403), or denied by the access gate.
    Authorization,
    /// Resource does not exist (HTTP 404).
    NotFound,
    /// Request payload rejected (HTTP 400/422) or invalid tool input.
    Validation,
    /// Remote throttling (HTTP 429).
    RateLimit,
    /// Remote failure (HTTP 5xx).
    ServerError,
    /// No response: connection failure or timeout.
    Network,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Returns true if a request failing with this kind may succeed when repeated.
    ///
    /// Only throttling, server faults and network failures are transient.
    /// Everything else fails the same way on every attempt.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::RateLimit | ErrorKind::ServerError | ErrorKind::Network
        )
    }

    /// Short lowercase label used in messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Authorization => "authorization",
            ErrorKind::NotFound => "not found",
            ErrorKind::Validation => "validation",
            ErrorKind::RateLimit => "rate limit",
            ErrorKind::ServerError => "server error",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

/// A normalized, kind-tagged failure of a single request attempt.
///
/// Immutable once built; the orchestrator either retries past it or
/// surfaces it unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error{}: {message}", status_suffix(.status))]
pub struct ClassifiedError {
    /// The failure category.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// HTTP status of the failed response, if a response was received.
    pub status: Option<u16>,
    /// Server-requested wait before retrying (rate limit only).
    pub retry_after: Option<Duration>,
}

impl ClassifiedError {
    /// Creates a classified error with no status and no hint.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            retry_after: None,
        }
    }

    /// Attaches the originating HTTP status.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches a retry-after hint.
    #[must_use]
    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }

    /// Returns true if the orchestrator may retry after this failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Unified error type for all Freshgate operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The remote call failed after the orchestrator's retry policy ran out.
    #[error(transparent)]
    Api(#[from] ClassifiedError),

    /// The access gate refused the operation. No request was sent.
    #[error("access denied for {operation}: {reason}")]
    AccessDenied {
        /// The operation that was refused.
        operation: String,
        /// Why the gate refused it.
        reason: DenyReason,
    },

    /// Tool input failed local validation. No request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        GatewayError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GatewayError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        GatewayError::Validation(message.into())
    }

    /// Creates an access denial for the named operation.
    pub fn access_denied(operation: impl Into<String>, reason: DenyReason) -> Self {
        GatewayError::AccessDenied {
            operation: operation.into(),
            reason,
        }
    }

    /// Maps this error onto the failure taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Api(e) => e.kind,
            GatewayError::AccessDenied { .. } => ErrorKind::Authorization,
            GatewayError::Validation(_) => ErrorKind::Validation,
            GatewayError::Config(_)
            | GatewayError::HttpClient(_)
            | GatewayError::Serialization(_) => ErrorKind::Unknown,
        }
    }

    /// Returns the HTTP status of the failed response, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api(e) => e.status,
            _ => None,
        }
    }

    /// Returns true if this error is transient.
    ///
    /// Errors surfaced from the orchestrator have already exhausted their
    /// retries; this only tells the caller whether trying later may help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Api(e) if e.is_retryable())
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_key: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_key)
    }
}

/// Truncates a remote body to [`MAX_ERROR_BODY_LEN`] bytes on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}
