//! Search-suggestion pipeline over the full-text search API and a geocoder.
//!
//! [`SequentialAggregator`] queries the full-text service, then the geocoder,
//! normalizes both through [`format`] and assembles one
//! [`SuggestionList`](sdc_core::SuggestionList) per query cycle.
//! [`SuggestionPresenter`] drives cycles from input events, discards stale
//! results and turns selections into navigation.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod format;
pub mod geocode;
pub mod presenter;
pub mod types;

pub use aggregate::{
    FailurePolicy, FullTextSource, GeocodeSource, SequentialAggregator, SuggestionSource,
    DEFAULT_RESULT_CAP,
};
pub use client::FullTextClient;
pub use error::SearchError;
pub use geocode::{GeocodeClient, GeocodeQuery, GeocodeRequest};
pub use presenter::{
    CycleDisposition, CycleOutcome, CycleTracker, HtmlItemTemplate, ItemTemplate, Navigator,
    PinToInput, PresenterState, RowStyle, SuggestionPresenter, SuggestionView, WidthPolicy,
};
