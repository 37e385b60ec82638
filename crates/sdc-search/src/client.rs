//! HTTP client for the full-text search API.
//!
//! Wraps `reqwest` with base-URL handling and envelope decoding. Items are
//! returned raw; see [`crate::format`] for per-item decoding.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::SearchError;
use crate::types::FullTextEnvelope;

const FULL_TEXT_PATH: &str = "2.1/full-text/search";

/// Client for `GET {base}/2.1/full-text/search?q={term}`.
///
/// Use [`FullTextClient::new`] with configuration values, or
/// [`FullTextClient::with_base_url`] to point at a mock server in tests.
pub struct FullTextClient {
    client: Client,
    base_url: Url,
}

impl FullTextClient {
    /// Creates a client for the given service base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidUrl`] if `base_url`
    /// is not a valid URL.
    pub fn new(base_url: &Url, timeout_secs: u64, user_agent: &str) -> Result<Self, SearchError> {
        Self::with_base_url(base_url.as_str(), timeout_secs, user_agent)
    }

    /// Creates a client from a base URL string (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`FullTextClient::new`].
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        let base_url = normalise_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Searches profiles, tables and topics for `term`.
    ///
    /// Returns the raw `results` array in server order.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Transport`] on network failure or non-2xx status.
    /// - [`SearchError::Malformed`] if the body is not JSON or has no
    ///   `results` array.
    pub async fn search(&self, term: &str) -> Result<Vec<serde_json::Value>, SearchError> {
        let url = self.build_url(term)?;
        tracing::debug!(term, url = %url, "requesting full-text suggestions");
        let body = request_json(&self.client, &url, "full-text").await?;
        let envelope: FullTextEnvelope =
            decode_envelope(&body, "full-text", || format!("search(q={term})"))?;
        Ok(envelope.results)
    }

    /// Builds the search URL with the term form-encoded into `q`.
    fn build_url(&self, term: &str) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(FULL_TEXT_PATH)
            .map_err(|e| SearchError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("q", term);
        Ok(url)
    }
}

/// Builds the shared `reqwest::Client` used by both sources.
pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SearchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Ensures the base URL ends with exactly one slash so `Url::join` appends
/// to the path instead of replacing its last segment.
pub(crate) fn normalise_base_url(base_url: &str) -> Result<Url, SearchError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| SearchError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
///
/// # Errors
///
/// Returns [`SearchError::Transport`] on network failure or a non-2xx status,
/// and [`SearchError::Malformed`] if the body is not valid JSON.
pub(crate) async fn request_json(
    client: &Client,
    url: &Url,
    source_name: &'static str,
) -> Result<serde_json::Value, SearchError> {
    let response = client.get(url.clone()).send().await?;
    let response = response.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SearchError::Malformed {
        source_name,
        context: url.path().to_string(),
        source: e,
    })
}

/// Decodes a response envelope, mapping shape mismatches to
/// [`SearchError::Malformed`].
pub(crate) fn decode_envelope<T, C>(
    body: &serde_json::Value,
    source_name: &'static str,
    context: C,
) -> Result<T, SearchError>
where
    T: DeserializeOwned,
    C: FnOnce() -> String,
{
    T::deserialize(body).map_err(|e| SearchError::Malformed {
        source_name,
        context: context(),
        source: e,
    })
}
