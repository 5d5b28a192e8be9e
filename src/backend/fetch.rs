//! Fetching remote documents over HTTP(S).

use crate::error::{RedactorError, RedactorResult};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Downloads a document, giving up after `timeout`.
///
/// Transport failures and non-success statuses are both
/// [`RedactorError::Network`].
pub fn fetch_document(url: &str, timeout: Duration) -> RedactorResult<Vec<u8>> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .timeout(timeout)
        .build()
        .map_err(|e| network_error(url, e))?;

    debug!(url, ?timeout, "fetching document");
    let response = client.get(url).send().map_err(|e| network_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(RedactorError::Network {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        });
    }

    let bytes = response.bytes().map_err(|e| network_error(url, e))?;
    debug!(url, len = bytes.len(), "document fetched");
    Ok(bytes.to_vec())
}

fn network_error(url: &str, err: reqwest::Error) -> RedactorError {
    RedactorError::Network {
        url: url.to_string(),
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}
