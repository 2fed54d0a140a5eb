//! Configuration management for the Freshgate MCP server.
//!
//! Configuration is loaded from environment variables, validated once, and
//! is immutable afterwards.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::access::Grant;
use crate::error::GatewayError;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default request budget per one-minute window.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 50;

/// Default base delay for exponential backoff in milliseconds.
pub const DEFAULT_RETRY_BASE_MS: u64 = 1_000;

/// Default upper bound for a single backoff delay in milliseconds.
pub const DEFAULT_RETRY_CAP_MS: u64 = 30_000;

/// Configuration for connecting to Freshdesk.
///
/// The API key is stored but never logged; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Config {
    /// Helpdesk domain: `acme`, `acme.freshdesk.com`, or a full `http(s)://` URL.
    pub domain: String,

    /// Freshdesk API key.
    /// This value must never be logged or included in error messages.
    pub api_key: String,

    /// Timeout for a single HTTP call.
    pub timeout: Duration,

    /// Retries allowed after the first attempt.
    pub max_retries: u32,

    /// Requests allowed per one-minute window.
    pub rate_limit_per_minute: u32,

    /// Base delay for exponential backoff.
    pub retry_base: Duration,

    /// Cap for a single backoff delay.
    pub retry_cap: Duration,

    /// The caller's access grant. `None` when absent or malformed; every
    /// gated tool is then denied.
    pub grant: Option<Grant>,
}

impl Config {
    /// Builds a configuration with defaults for everything except the
    /// domain and key. No grant is attached.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_retries: DEFAULT_MAX_RETRIES,
            rate_limit_per_minute: DEFAULT_RATE_LIMIT_PER_MINUTE,
            retry_base: Duration::from_millis(DEFAULT_RETRY_BASE_MS),
            retry_cap: Duration::from_millis(DEFAULT_RETRY_CAP_MS),
            grant: None,
        }
    }

    /// Attaches a caller grant.
    #[must_use]
    pub fn with_grant(mut self, grant: Grant) -> Self {
        self.grant = Some(grant);
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRESHDESK_DOMAIN`: helpdesk domain or base URL
    /// - `FRESHDESK_API_KEY`: API key for authentication
    ///
    /// # Optional Environment Variables
    ///
    /// - `FRESHDESK_TIMEOUT_MS` (default 30000)
    /// - `FRESHDESK_MAX_RETRIES` (default 3)
    /// - `FRESHDESK_RATE_LIMIT` (default 50 per minute)
    /// - `FRESHDESK_RETRY_BASE_MS` (default 1000)
    /// - `FRESHDESK_RETRY_CAP_MS` (default 30000)
    /// - `FRESHDESK_ACCESS_LEVEL` and `FRESHDESK_PERMISSIONS` for the caller grant
    ///
    /// A malformed grant does not fail loading. It is logged and dropped, so
    /// gated tools deny.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if a required variable is missing or a
    /// value fails validation.
    pub fn from_env() -> Result<Self, GatewayError> {
        let domain = Self::get_required_env("FRESHDESK_DOMAIN")?;
        let api_key = Self::get_required_env("FRESHDESK_API_KEY")?;

        let domain = Self::validate_domain(domain)?;
        Self::validate_api_key(&api_key)?;

        let timeout_ms = Self::get_numeric_env("FRESHDESK_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let max_retries = Self::get_numeric_env("FRESHDESK_MAX_RETRIES", DEFAULT_MAX_RETRIES)?;
        let rate_limit_per_minute =
            Self::get_numeric_env("FRESHDESK_RATE_LIMIT", DEFAULT_RATE_LIMIT_PER_MINUTE)?;
        let retry_base_ms = Self::get_numeric_env("FRESHDESK_RETRY_BASE_MS", DEFAULT_RETRY_BASE_MS)?;
        let retry_cap_ms = Self::get_numeric_env("FRESHDESK_RETRY_CAP_MS", DEFAULT_RETRY_CAP_MS)?;

        if timeout_ms == 0 {
            return Err(GatewayError::invalid_config(
                "FRESHDESK_TIMEOUT_MS must be greater than zero",
            ));
        }
        if rate_limit_per_minute == 0 {
            return Err(GatewayError::invalid_config(
                "FRESHDESK_RATE_LIMIT must be greater than zero",
            ));
        }
        if retry_cap_ms < retry_base_ms {
            return Err(GatewayError::invalid_config(
                "FRESHDESK_RETRY_CAP_MS must not be smaller than FRESHDESK_RETRY_BASE_MS",
            ));
        }

        let grant = Self::grant_from_env();

        Ok(Config {
            domain,
            api_key,
            timeout: Duration::from_millis(timeout_ms),
            max_retries,
            rate_limit_per_minute,
            retry_base: Duration::from_millis(retry_base_ms),
            retry_cap: Duration::from_millis(retry_cap_ms),
            grant,
        })
    }

    /// Reads the caller grant. Absent or malformed yields `None`.
    fn grant_from_env() -> Option<Grant> {
        let level = env::var("FRESHDESK_ACCESS_LEVEL").ok()?;
        let permissions = env::var("FRESHDESK_PERMISSIONS").unwrap_or_default();
        match Grant::parse(&level, &permissions) {
            Ok(grant) => Some(grant),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed access grant; all gated tools will be denied");
                None
            }
        }
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, GatewayError> {
        env::var(name)
            .map_err(|_| GatewayError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(GatewayError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Gets an optional numeric environment variable.
    fn get_numeric_env<T>(name: &str, default: T) -> Result<T, GatewayError>
    where
        T: std::str::FromStr,
    {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Self::parse_numeric(name, &value),
            _ => Ok(default),
        }
    }

    fn parse_numeric<T>(name: &str, value: &str) -> Result<T, GatewayError>
    where
        T: std::str::FromStr,
    {
        value.trim().parse::<T>().map_err(|_| {
            GatewayError::invalid_config(format!(
                "{} must be a non-negative integer, got {:?}",
                name,
                value.chars().take(20).collect::<String>()
            ))
        })
    }

    /// Validates and normalizes the domain.
    ///
    /// Accepts a bare subdomain, a host name, or a full URL. Full URLs must
    /// use http or https.
    fn validate_domain(domain: String) -> Result<String, GatewayError> {
        let domain = domain.trim().trim_end_matches('/').to_string();

        if domain.contains("://") {
            if !domain.starts_with("http://") && !domain.starts_with("https://") {
                return Err(GatewayError::invalid_config(
                    "FRESHDESK_DOMAIN URL must start with http:// or https://",
                ));
            }
            url::Url::parse(&domain).map_err(|e| {
                GatewayError::invalid_config(format!("FRESHDESK_DOMAIN is not a valid URL: {}", e))
            })?;
            return Ok(domain);
        }

        let valid = domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        if domain.is_empty() || !valid {
            return Err(GatewayError::invalid_config(
                "FRESHDESK_DOMAIN must be a subdomain (acme), a host (acme.freshdesk.com) or a URL",
            ));
        }

        Ok(domain)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), GatewayError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = [
            "your_api_key",
            "your_key",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(GatewayError::invalid_config(
                    "FRESHDESK_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("retry_base", &self.retry_base)
            .field("retry_cap", &self.retry_cap)
            .field("grant", &self.grant)
            .finish()
    }
}
