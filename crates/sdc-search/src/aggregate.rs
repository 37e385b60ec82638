//! Two-stage suggestion aggregation: full-text first, geocode second.

use std::future::Future;

use sdc_core::{AppConfig, QueryContext, SuggestionList};

use crate::client::FullTextClient;
use crate::error::SearchError;
use crate::format::{fallback_suggestion, format_full_text_batch, format_geocode_batch};
use crate::geocode::{GeocodeClient, GeocodeQuery};

/// Default cap on full-text suggestions per cycle.
pub const DEFAULT_RESULT_CAP: usize = 20;

/// Raw full-text results for a term, in server order.
pub trait FullTextSource: Send + Sync {
    fn search(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, SearchError>> + Send;
}

/// Raw geocoder features for a term, in provider order.
pub trait GeocodeSource: Send + Sync {
    fn lookup(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<serde_json::Value>, SearchError>> + Send;
}

/// Anything that can turn one query cycle into a suggestion list.
///
/// The presenter depends on this trait only.
pub trait SuggestionSource: Send + Sync {
    fn aggregate(
        &self,
        query: &QueryContext,
    ) -> impl Future<Output = Result<SuggestionList, SearchError>> + Send;
}

impl FullTextSource for FullTextClient {
    async fn search(&self, term: &str) -> Result<Vec<serde_json::Value>, SearchError> {
        FullTextClient::search(self, term).await
    }
}

impl GeocodeSource for GeocodeClient {
    async fn lookup(&self, term: &str) -> Result<Vec<serde_json::Value>, SearchError> {
        GeocodeClient::lookup(self, term).await
    }
}

/// What to do when one of the two sources fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any full-text failure, or a geocode transport failure, fails the whole
    /// cycle. A geocode response without a `features` array counts as zero
    /// geocode results.
    #[default]
    FailClosed,
    /// A failing source contributes zero suggestions; the cycle still
    /// resolves with the fallback entry.
    Partial,
}

/// Runs the full-text request, then the geocode request, and assembles
/// `[fallback] ++ full_text(≤ cap) ++ geocode`.
pub struct SequentialAggregator<F, G> {
    full_text: F,
    geocode: G,
    result_cap: usize,
    policy: FailurePolicy,
}

impl<F, G> SequentialAggregator<F, G>
where
    F: FullTextSource,
    G: GeocodeSource,
{
    #[must_use]
    pub fn new(full_text: F, geocode: G) -> Self {
        Self {
            full_text,
            geocode,
            result_cap: DEFAULT_RESULT_CAP,
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    #[must_use]
    pub fn result_cap(&self) -> usize {
        self.result_cap
    }

    /// Runs one cycle for `query`.
    ///
    /// The geocode request is only sent after the full-text response has been
    /// formatted, so full-text suggestions always precede geocode ones.
    ///
    /// # Errors
    ///
    /// Under [`FailurePolicy::FailClosed`], returns the full-text error (the
    /// geocoder is then never contacted) or a geocode transport error. Under
    /// [`FailurePolicy::Partial`] this never fails.
    pub async fn aggregate(&self, query: &QueryContext) -> Result<SuggestionList, SearchError> {
        let term = query.term();
        let sequence = query.sequence();

        let full_text = match self.full_text.search(term).await {
            Ok(items) => format_full_text_batch(&items, self.result_cap),
            Err(err) if self.policy == FailurePolicy::Partial => {
                tracing::warn!(term, sequence, error = %err, "full-text source failed; continuing without it");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(term, sequence, error = %err, "full-text source failed; abandoning cycle");
                return Err(err);
            }
        };

        let geocode = match self.geocode.lookup(term).await {
            Ok(features) => format_geocode_batch(&features, query),
            Err(err) if err.is_malformed() || self.policy == FailurePolicy::Partial => {
                tracing::warn!(term, sequence, error = %err, "geocode source failed; continuing without it");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(term, sequence, error = %err, "geocode source failed; abandoning cycle");
                return Err(err);
            }
        };

        tracing::debug!(
            term,
            sequence,
            full_text = full_text.len(),
            geocode = geocode.len(),
            "assembled suggestions"
        );

        Ok(SuggestionList::assemble(
            fallback_suggestion(query),
            full_text,
            geocode,
        ))
    }
}

impl SequentialAggregator<FullTextClient, GeocodeClient> {
    /// Wires the HTTP clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if either client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        let full_text = FullTextClient::new(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        let query = GeocodeQuery::new(
            config.geocode_base_url.as_str(),
            &config.geocode_token,
            &config.geocode_country,
        )?;
        let geocode = GeocodeClient::new(query, config.http_timeout_secs, &config.user_agent)?;

        let policy = if config.partial_results {
            FailurePolicy::Partial
        } else {
            FailurePolicy::FailClosed
        };

        Ok(Self::new(full_text, geocode)
            .with_result_cap(config.fulltext_result_cap)
            .with_failure_policy(policy))
    }
}

impl<F, G> SuggestionSource for SequentialAggregator<F, G>
where
    F: FullTextSource,
    G: GeocodeSource,
{
    async fn aggregate(&self, query: &QueryContext) -> Result<SuggestionList, SearchError> {
        SequentialAggregator::aggregate(self, query).await
    }
}
