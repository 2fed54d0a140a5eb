//! HTTP client for the Freshdesk API.
//!
//! [`FreshdeskClient`] is the request orchestrator. Every call goes through
//! [`FreshdeskClient::send`], which:
//!
//! 1. waits for one unit of request budget,
//! 2. sends the request with the credential headers,
//! 3. on success adopts the remote quota headers and returns the JSON body,
//! 4. on failure classifies it and either retries or gives up.
//!
//! Retries stop as soon as a failure is not retryable or the retry ceiling is
//! reached; the last classified error is returned unchanged. The resource
//! methods (tickets, contacts, ...) live in [`crate::resources`].
//!
//! # Security
//!
//! The API key is never logged. Error bodies are sanitized before they are
//! classified.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::classify::{classify_status, classify_transport};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::{ClassifiedError, ErrorKind, GatewayError};
use crate::rate_limit::{QuotaInfo, RateLimiter};
use crate::retry::RetryPolicy;

/// Per-call extras merged into a request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query string parameters.
    pub query: Vec<(String, String)>,
    /// Headers added on top of the credential headers.
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds query parameters.
    #[must_use]
    pub fn with_query<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Authenticated, rate-limited, retrying client for one Freshdesk account.
///
/// Cloning is cheap and clones share the same quota tracker.
#[derive(Clone)]
pub struct FreshdeskClient {
    /// The underlying HTTP client.
    http: Client,

    /// Base URL and authentication headers.
    credentials: Credentials,

    /// Request budget shared by all clones.
    quota: Arc<RateLimiter>,

    /// Retry ceiling and backoff.
    retry: RetryPolicy,

    /// Per-call timeout, reported in timeout errors.
    timeout: Duration,

    /// API key, kept only to scrub it from error messages.
    /// SECURITY: Never log this value!
    api_key: String,
}

impl FreshdeskClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::HttpClient` if the HTTP client fails to
    /// initialize, or `GatewayError::Config` if the key is unusable.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::HttpClient)?;

        Ok(Self {
            http,
            credentials: Credentials::new(config)?,
            quota: Arc::new(RateLimiter::new(config.rate_limit_per_minute)),
            retry: RetryPolicy::from_config(config),
            timeout: config.timeout,
            api_key: config.api_key.clone(),
        })
    }

    /// Replaces the quota tracker.
    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: RateLimiter) -> Self {
        self.quota = Arc::new(limiter);
        self
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        self.credentials.base_url()
    }

    /// Returns the retry policy in use.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns a snapshot of the request budget.
    pub fn rate_limit_info(&self) -> QuotaInfo {
        self.quota.get_info()
    }

    /// Returns a reference to the API key for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_key_for_sanitization(&self) -> &str {
        &self.api_key
    }

    /// Tests connectivity and credentials by fetching the current agent.
    ///
    /// # Errors
    ///
    /// Returns the classified failure, e.g. `Authentication` for a bad key.
    pub async fn test_connection(&self) -> Result<(), GatewayError> {
        tracing::debug!("Testing connection to Freshdesk");

        let agent = self.get_current_agent().await?;
        tracing::info!(agent_id = agent.id, "Connection test successful");
        Ok(())
    }

    /// Sends one logical request, retrying transient failures.
    ///
    /// `path` is relative to the base URL, e.g. `/tickets/42`. The payload,
    /// if any, is sent as a JSON body. An empty success body (e.g. 204 from
    /// a delete) yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns the last [`ClassifiedError`] once the failure is terminal or
    /// the retry ceiling is reached.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Value, ClassifiedError> {
        let url = format!("{}{}", self.credentials.base_url(), path);
        let mut attempt = 0u32;

        loop {
            self.quota.check_limit().await;

            tracing::debug!(
                method = %method,
                path = %path,
                attempt = attempt,
                "Sending Freshdesk API request"
            );

            let error = match self.send_once(&method, &url, path, attempt, payload, options).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.retry.should_retry(attempt, &error) {
                if error.is_retryable() {
                    tracing::debug!(
                        method = %method,
                        path = %path,
                        attempts = attempt + 1,
                        "All retry attempts exhausted"
                    );
                } else {
                    tracing::debug!(
                        method = %method,
                        path = %path,
                        kind = %error.kind,
                        status = ?error.status,
                        "Request failed"
                    );
                }
                return Err(error);
            }

            let delay = self.retry.delay_for(attempt, &error);
            tracing::warn!(
                method = %method,
                path = %path,
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                kind = %error.kind,
                status = error.status,
                "Retrying after transient error"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// One attempt: send, then either decode the body or classify the failure.
    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        path: &str,
        attempt: u32,
        payload: Option<&Value>,
        options: &RequestOptions,
    ) -> Result<Value, ClassifiedError> {
        let mut headers = self.credentials.auth_header();
        headers.extend(options.headers.clone());

        let mut req = self.http.request(method.clone(), url).headers(headers);
        if !options.query.is_empty() {
            req = req.query(&options.query);
        }
        if let Some(body) = payload {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| self.redact(classify_transport(&e, self.timeout)))?;
        let status = response.status();

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            attempt = attempt,
            "Received Freshdesk API response"
        );

        if !status.is_success() {
            if status.as_u16() == 429 {
                tracing::warn!(path = %path, "Rate limited by Freshdesk");
            }
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            let body = GatewayError::sanitize_message(&body, &self.api_key);
            return Err(classify_status(status, &headers, &body));
        }

        self.quota.update_from_headers(response.headers());

        let body = response
            .text()
            .await
            .map_err(|e| self.redact(classify_transport(&e, self.timeout)))?;

        tracing::trace!(body = %body, "Freshdesk API response");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            ClassifiedError::new(ErrorKind::Unknown, format!("invalid JSON in response: {}", e))
                .with_status(status.as_u16())
        })
    }

    fn redact(&self, mut error: ClassifiedError) -> ClassifiedError {
        error.message = GatewayError::sanitize_message(&error.message, &self.api_key);
        error
    }

    /// GET `path` and decode the body.
    pub(crate) async fn get<T>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let options = RequestOptions::new().with_query(query);
        let value = self.send(Method::GET, path, None, &options).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST `body` to `path` and decode the response.
    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)?;
        let value = self
            .send(Method::POST, path, Some(&payload), &RequestOptions::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// PUT `body` to `path` and decode the response.
    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_value(body)?;
        let value = self
            .send(Method::PUT, path, Some(&payload), &RequestOptions::new())
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE `path`, ignoring any body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), GatewayError> {
        self.send(Method::DELETE, path, None, &RequestOptions::new())
            .await?;
        Ok(())
    }
}

impl std::fmt::Debug for FreshdeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreshdeskClient")
            .field("credentials", &self.credentials)
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
