//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use freshgate::client::FreshdeskClient;
use freshgate::config::Config;
use wiremock::MockServer;

/// API key used by every test client.
pub const API_KEY: &str = "test_key_12345";

/// `Basic base64("test_key_12345:X")`.
pub const AUTH_HEADER: &str = "Basic dGVzdF9rZXlfMTIzNDU6WA==";

/// Config pointing at the mock server with near-instant backoff.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::new(server.uri(), API_KEY);
    config.retry_base = Duration::from_millis(1);
    config.retry_cap = Duration::from_millis(10);
    config
}

/// Client pointing at the mock server with near-instant backoff.
pub fn client_for(server: &MockServer) -> FreshdeskClient {
    FreshdeskClient::new(&config_for(server)).expect("client should build")
}
