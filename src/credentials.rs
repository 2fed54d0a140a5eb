//! Credential provider for the Freshdesk API.
//!
//! Derives the API base URL and the authentication header from
//! configuration. Both are computed once; reading them afterwards cannot
//! fail and has no side effects.
//!
//! Freshdesk uses HTTP Basic authentication with the API key as the user
//! name and a literal `X` as the password.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::config::Config;
use crate::error::GatewayError;

/// Path prefix of the v2 REST API.
const API_PATH: &str = "/api/v2";

/// Host suffix appended to bare subdomains.
const FRESHDESK_HOST_SUFFIX: &str = "freshdesk.com";

/// Base URL and authentication header for one configured credential.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    headers: HeaderMap,
}

impl Credentials {
    /// Builds credentials from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Config` if the key cannot be carried in a header.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let encoded = STANDARD.encode(format!("{}:X", config.api_key));
        let mut auth = HeaderValue::from_str(&format!("Basic {}", encoded))
            .map_err(|_| GatewayError::invalid_config("FRESHDESK_API_KEY contains invalid characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: Self::derive_base_url(&config.domain),
            headers,
        })
    }

    /// Returns the API base URL, e.g. `https://acme.freshdesk.com/api/v2`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers to attach to every request.
    pub fn auth_header(&self) -> HeaderMap {
        self.headers.clone()
    }

    /// Maps a configured domain onto the API base URL.
    fn derive_base_url(domain: &str) -> String {
        let domain = domain.trim().trim_end_matches('/');

        let origin = if domain.contains("://") {
            domain.to_string()
        } else if domain.contains('.') {
            format!("https://{}", domain)
        } else {
            format!("https://{}.{}", domain, FRESHDESK_HOST_SUFFIX)
        };

        if origin.ends_with(API_PATH) {
            origin
        } else {
            format!("{}{}", origin, API_PATH)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("auth", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_base_url() {
        assert_eq!(
            Credentials::derive_base_url("acme"),
            "https://acme.freshdesk.com/api/v2"
        );
        assert_eq!(
            Credentials::derive_base_url("support.acme.io"),
            "https://support.acme.io/api/v2"
        );
        assert_eq!(
            Credentials::derive_base_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/api/v2"
        );
        assert_eq!(
            Credentials::derive_base_url("https://acme.freshdesk.com/api/v2"),
            "https://acme.freshdesk.com/api/v2"
        );
    }

    #[test]
    fn test_auth_header_is_basic_key_x() {
        let credentials = Credentials::new(&Config::new("acme", "abc123")).unwrap();
        let headers = credentials.auth_header();

        // base64("abc123:X")
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Basic YWJjMTIzOlg=");
        assert!(headers.get(AUTHORIZATION).unwrap().is_sensitive());
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let credentials = Credentials::new(&Config::new("acme", "abc123")).unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("YWJjMTIzOlg="));
        assert!(debug.contains("[REDACTED]"));
    }
}
