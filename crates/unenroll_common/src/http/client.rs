// --- File: crates/unenroll_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Builds the outbound HTTP client shared by all requests of the process.
///
/// `reqwest::Client` is a handle around a connection pool, so callers clone it
/// freely instead of building new ones per request.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("unenroll/", env!("CARGO_PKG_VERSION")))
        .build()
}
