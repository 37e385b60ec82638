//! Conversion of raw source items into [`Suggestion`]s.
//!
//! Items that cannot be displayed are dropped, never reported as errors:
//! unknown categories keep the client working when the search API grows new
//! result types, and a malformed item only costs that one row.

use percent_encoding::utf8_percent_encode;
use sdc_core::{QueryContext, Suggestion, SuggestionKind};
use serde::Deserialize;

use crate::geocode::URI_COMPONENT;
use crate::types::{FullTextItem, GeocodeFeature};

pub const FALLBACK_LABEL: &str = "Don't see what you're looking for?";
pub const GEOCODE_SUBLINE: &str = "Map this address";
pub const TOPIC_SUBLINE: &str = "Documentation";

/// Formats one full-text result, or `None` if it should not be shown.
#[must_use]
pub fn format_full_text(item: &serde_json::Value) -> Option<Suggestion> {
    match FullTextItem::deserialize(item) {
        Ok(FullTextItem::Profile(p)) => Some(Suggestion::new(
            SuggestionKind::Profile,
            p.full_name,
            p.sumlevel_name.unwrap_or_default(),
            p.url,
        )),
        Ok(FullTextItem::Table(t)) => Some(Suggestion::new(
            SuggestionKind::Table,
            t.table_name,
            format!("Table topics: {}", t.topics.join(", ")),
            t.url,
        )),
        Ok(FullTextItem::Topic(t)) => Some(Suggestion::new(
            SuggestionKind::Topic,
            t.topic_name,
            TOPIC_SUBLINE,
            t.url,
        )),
        Ok(FullTextItem::Unknown) => {
            tracing::debug!(
                kind = item.get("type").and_then(serde_json::Value::as_str),
                "skipping full-text result of unrecognized type"
            );
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "skipping malformed full-text result");
            None
        }
    }
}

/// Formats full-text results in server order, keeping at most `cap`
/// displayable items.
#[must_use]
pub fn format_full_text_batch(items: &[serde_json::Value], cap: usize) -> Vec<Suggestion> {
    items
        .iter()
        .filter_map(format_full_text)
        .take(cap)
        .collect()
}

/// Formats one geocoder feature as a "map this address" suggestion.
///
/// The feature's `center` is `[lng, lat]`; the target is
/// `/locate/?lat={lat}&lng={lng}&address={place}`.
#[must_use]
pub fn format_geocode(feature: &serde_json::Value, query: &QueryContext) -> Option<Suggestion> {
    let feature = match GeocodeFeature::deserialize(feature) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(
                term = query.term(),
                sequence = query.sequence(),
                error = %e,
                "skipping malformed geocode feature"
            );
            return None;
        }
    };

    let target_url = format!(
        "/locate/?lat={}&lng={}&address={}",
        feature.latitude(),
        feature.longitude(),
        utf8_percent_encode(&feature.place_name, URI_COMPONENT)
    );
    Some(Suggestion::new(
        SuggestionKind::Place,
        feature.place_name,
        GEOCODE_SUBLINE,
        target_url,
    ))
}

/// Formats every geocoder feature that can be displayed, in provider order.
#[must_use]
pub fn format_geocode_batch(features: &[serde_json::Value], query: &QueryContext) -> Vec<Suggestion> {
    features
        .iter()
        .filter_map(|f| format_geocode(f, query))
        .collect()
}

/// The leading "see all results" entry; its target embeds the term verbatim.
#[must_use]
pub fn fallback_suggestion(query: &QueryContext) -> Suggestion {
    let term = query.term();
    Suggestion::new(
        SuggestionKind::AllResults,
        FALLBACK_LABEL,
        format!("View all search results for {term}"),
        format!("/search/?q={term}"),
    )
}
