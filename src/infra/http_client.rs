//! HTTP client factory with consistent timeout configuration.
//!
//! Outbound clients should be built here rather than constructing
//! `reqwest::Client` directly, so every call to the document store gets the
//! same timeouts.

use reqwest::Client;
use std::time::Duration;

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with default timeouts.
///
/// `accept_invalid_certs` is for self-hosted stores running on self-signed
/// certificates and must stay off for anything reachable from the internet.
pub fn try_build_client(accept_invalid_certs: bool) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
        .timeout(DEFAULT_REQUEST_TIMEOUT)
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
}
