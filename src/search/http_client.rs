//! HTTP client construction for search requests.
//!
//! Only the connect phase is bounded; a response that never arrives blocks
//! the run until the process is stopped.

use std::time::Duration;

use reqwest::Client;

use super::SearchError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Builds the client shared by every search of a run.
///
/// # Errors
///
/// Returns [`SearchError::Client`] when client construction fails.
pub(crate) fn build_search_http_client(user_agent: impl Into<String>) -> Result<Client, SearchError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .user_agent(user_agent.into())
        .gzip(true)
        .build()
        .map_err(|err| SearchError::Client {
            reason: format!("HTTP client construction failed: {err}"),
        })
}
