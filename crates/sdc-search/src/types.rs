//! Response types for the full-text search API and the geocoder.
//!
//! Envelopes are decoded strictly; individual items are kept as raw
//! [`serde_json::Value`]s and decoded one at a time by [`crate::format`] so a
//! single bad item is dropped instead of failing the batch.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// full-text search: GET {base}/2.1/full-text/search?q={term}
// ---------------------------------------------------------------------------

/// `{ "results": [ ... ] }`
#[derive(Debug, Deserialize)]
pub struct FullTextEnvelope {
    pub results: Vec<serde_json::Value>,
}

/// One full-text result, discriminated by its `type` field.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FullTextItem {
    Profile(ProfileResult),
    Table(TableResult),
    Topic(TopicResult),
    /// Any category this client does not know how to display.
    #[serde(other)]
    Unknown,
}

/// Geography profile result.
#[derive(Debug, Deserialize)]
pub struct ProfileResult {
    pub full_name: String,
    /// Summary level of the geography, e.g. `"county"` or `"place"`.
    #[serde(default)]
    pub sumlevel_name: Option<String>,
    pub url: String,
}

/// Census table result.
#[derive(Debug, Deserialize)]
pub struct TableResult {
    pub table_name: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub url: String,
}

/// Documentation topic result.
#[derive(Debug, Deserialize)]
pub struct TopicResult {
    pub topic_name: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// geocode: GET {geocodeBase}/{term}.json
// ---------------------------------------------------------------------------

/// `{ "features": [ ... ] }`
#[derive(Debug, Deserialize)]
pub struct GeocodeEnvelope {
    pub features: Vec<serde_json::Value>,
}

/// A single geocoder match.
#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    pub place_name: String,
    /// `[longitude, latitude]`, in that order.
    pub center: [f64; 2],
}

impl GeocodeFeature {
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.center[0]
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.center[1]
    }
}
