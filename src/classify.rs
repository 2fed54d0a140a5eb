//! Failure classifier.
//!
//! Maps a transport error or a non-success HTTP response onto the fixed
//! [`ErrorKind`] taxonomy. Whether a kind is retryable is decided by
//! [`ErrorKind::is_retryable`]; this module only decides the kind and builds
//! the message.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;

use crate::error::{ClassifiedError, ErrorKind};
use crate::models::ErrorResponse;

/// Maps an HTTP status onto an error kind.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        401 => ErrorKind::Authentication,
        403 => ErrorKind::Authorization,
        404 => ErrorKind::NotFound,
        400 | 422 => ErrorKind::Validation,
        429 => ErrorKind::RateLimit,
        500..=599 => ErrorKind::ServerError,
        _ => ErrorKind::Unknown,
    }
}

/// Reads `Retry-After` as a number of seconds.
///
/// The HTTP-date form is not used by the API and is ignored.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Classifies a non-success response.
///
/// `body` must already be sanitized. JSON error bodies are condensed with
/// [`ErrorResponse::summary`]; anything else is used verbatim, truncated.
pub fn classify_status(status: StatusCode, headers: &HeaderMap, body: &str) -> ClassifiedError {
    let kind = kind_for_status(status);
    let message = describe(status, body);

    let retry_after = if kind == ErrorKind::RateLimit {
        parse_retry_after(headers)
    } else {
        None
    };

    ClassifiedError::new(kind, message)
        .with_status(status.as_u16())
        .with_retry_after(retry_after)
}

/// Classifies a failure where no usable response was received.
///
/// Timeouts and connection failures are `Network`. Errors raised while
/// building the request never reached the remote and are `Unknown`.
pub fn classify_transport(error: &reqwest::Error, timeout: Duration) -> ClassifiedError {
    if error.is_timeout() {
        return ClassifiedError::new(
            ErrorKind::Network,
            format!("request timed out after {}ms", timeout.as_millis()),
        );
    }
    if error.is_builder() {
        return ClassifiedError::new(ErrorKind::Unknown, format!("invalid request: {}", error));
    }
    if error.is_connect() {
        return ClassifiedError::new(ErrorKind::Network, format!("connection failed: {}", error));
    }
    if let Some(status) = error.status() {
        return ClassifiedError::new(kind_for_status(status), error.to_string())
            .with_status(status.as_u16());
    }
    ClassifiedError::new(ErrorKind::Network, error.to_string())
}

fn describe(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string();
    }

    match serde_json::from_str::<ErrorResponse>(trimmed)
        .ok()
        .and_then(|r| r.summary())
    {
        Some(summary) => crate::error::truncate_body(&summary),
        None => crate::error::truncate_body(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn empty() -> HeaderMap {
        HeaderMap::new()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (401, ErrorKind::Authentication),
            (403, ErrorKind::Authorization),
            (404, ErrorKind::NotFound),
            (400, ErrorKind::Validation),
            (422, ErrorKind::Validation),
            (429, ErrorKind::RateLimit),
            (500, ErrorKind::ServerError),
            (502, ErrorKind::ServerError),
            (503, ErrorKind::ServerError),
            (504, ErrorKind::ServerError),
            (409, ErrorKind::Unknown),
            (302, ErrorKind::Unknown),
        ];
        for (code, expected) in cases {
            let status = StatusCode::from_u16(code).unwrap();
            assert_eq!(kind_for_status(status), expected, "status {}", code);
        }
    }

    #[test]
    fn test_server_errors_are_retryable() {
        for code in [500, 502, 503, 504] {
            let err = classify_status(StatusCode::from_u16(code).unwrap(), &empty(), "");
            assert_eq!(err.kind, ErrorKind::ServerError);
            assert!(err.is_retryable());
            assert_eq!(err.status, Some(code));
        }
    }

    #[test]
    fn test_client_errors_are_terminal() {
        let err = classify_status(StatusCode::UNAUTHORIZED, &empty(), "");
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert!(!err.is_retryable());

        let err = classify_status(StatusCode::NOT_FOUND, &empty(), "");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(!err.is_retryable());
        assert_eq!(err.message, "Not Found");
    }

    #[test]
    fn test_rate_limit_captures_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("5"));
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, &headers, "");
        assert_eq!(err.kind, ErrorKind::RateLimit);
        assert!(err.is_retryable());
        assert_eq!(err.retry_after, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_retry_after_ignored_outside_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("5"));
        let err = classify_status(StatusCode::SERVICE_UNAVAILABLE, &headers, "");
        assert_eq!(err.retry_after, None);
    }

    #[test]
    fn test_retry_after_http_date_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn test_validation_body_is_condensed() {
        let body = r#"{
            "description": "Validation failed",
            "errors": [{"field": "email", "message": "It should be a valid email address", "code": "invalid_value"}]
        }"#;
        let err = classify_status(StatusCode::BAD_REQUEST, &empty(), body);
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(
            err.message,
            "Validation failed: email: It should be a valid email address"
        );
    }

    #[test]
    fn test_plain_body_used_verbatim() {
        let err = classify_status(StatusCode::BAD_GATEWAY, &empty(), "upstream unavailable");
        assert_eq!(err.message, "upstream unavailable");
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(2_000);
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, &empty(), &body);
        assert!(err.message.ends_with("...[truncated]"));
        assert!(err.message.len() < 600);
    }
}
