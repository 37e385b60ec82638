//! Geocode lookups for free-text input.
//!
//! [`GeocodeQuery`] only builds requests; [`GeocodeClient`] sends them.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Url};

use crate::client::{build_http_client, decode_envelope, request_json};
use crate::error::SearchError;
use crate::types::GeocodeEnvelope;

/// Characters left alone by JavaScript's `encodeURIComponent`.
pub(crate) const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds `{base}/{term}.json?access_token={token}&country={country}`.
#[derive(Clone)]
pub struct GeocodeQuery {
    base_url: String,
    access_token: String,
    country: String,
}

impl GeocodeQuery {
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, access_token: &str, country: &str) -> Result<Self, SearchError> {
        let trimmed = base_url.trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| SearchError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url: trimmed.to_string(),
            access_token: access_token.to_string(),
            country: country.to_string(),
        })
    }

    /// Builds the lookup request for `term`. No I/O.
    ///
    /// The term is percent-encoded into the path segment; the token and
    /// country filter are form-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidUrl`] if the assembled URL does not parse.
    pub fn build_request(&self, term: &str) -> Result<GeocodeRequest, SearchError> {
        let encoded = utf8_percent_encode(term, URI_COMPONENT);
        let raw = format!("{}/{encoded}.json", self.base_url);
        let mut url = Url::parse(&raw).map_err(|e| SearchError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token)
            .append_pair("country", &self.country);
        Ok(GeocodeRequest { url })
    }
}

impl std::fmt::Debug for GeocodeQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeQuery")
            .field("base_url", &self.base_url)
            .field("access_token", &"[redacted]")
            .field("country", &self.country)
            .finish()
    }
}

/// A ready-to-send geocode lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    url: Url,
}

impl GeocodeRequest {
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL with `access_token` masked, for logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "access_token" {
                    "[redacted]".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();
        let mut url = self.url.clone();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

impl std::fmt::Display for GeocodeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl std::fmt::Debug for GeocodeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GeocodeRequest")
            .field(&self.redacted())
            .finish()
    }
}

/// Sends [`GeocodeQuery`] requests and decodes the `features` envelope.
pub struct GeocodeClient {
    client: Client,
    query: GeocodeQuery,
}

impl GeocodeClient {
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] if the `reqwest::Client` cannot be
    /// constructed.
    pub fn new(query: GeocodeQuery, timeout_secs: u64, user_agent: &str) -> Result<Self, SearchError> {
        let client = build_http_client(timeout_secs, user_agent)?;
        Ok(Self { client, query })
    }

    /// Looks up places matching `term`, returning raw features in provider
    /// order.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Transport`] on network failure or non-2xx status.
    /// - [`SearchError::Malformed`] if the body has no `features` array.
    /// - [`SearchError::InvalidUrl`] if the request URL cannot be built.
    pub async fn lookup(&self, term: &str) -> Result<Vec<serde_json::Value>, SearchError> {
        let request = self.query.build_request(term)?;
        tracing::debug!(term, url = %request, "requesting geocode suggestions");
        let body = request_json(&self.client, request.url(), "geocode").await?;
        let envelope: GeocodeEnvelope =
            decode_envelope(&body, "geocode", || format!("geocode(term={term})"))?;
        Ok(envelope.features)
    }
}
