use thiserror::Error;

/// Errors produced while fetching or decoding suggestion sources.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network failure, TLS failure or non-2xx status from a source.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was received but does not have the expected envelope.
    #[error("malformed {source_name} response for {context}: {source}")]
    Malformed {
        source_name: &'static str,
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl SearchError {
    /// `true` when the response arrived but could not be decoded.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, SearchError::Malformed { .. })
    }
}
