//! Interaction layer between an input box and the aggregator.
//!
//! The presenter owns the dropdown's state machine:
//!
//! ```text
//! Idle ──input──▶ Querying ──outcome──▶ Rendered ──select──▶ Navigating
//!  ▲                 ▲                     │
//!  └──── blur ───────┴──── more input ─────┘
//! ```
//!
//! Aggregations run as tokio tasks and report back on an unbounded channel.
//! The event loop feeds each [`CycleOutcome`] to
//! [`SuggestionPresenter::on_cycle_complete`], which renders it only if no
//! later cycle has been dispatched since.

mod cycle;
mod render;

use std::sync::Arc;

use sdc_core::{QueryContext, SuggestionList};
use tokio::sync::mpsc;

use crate::aggregate::SuggestionSource;

pub use cycle::{CycleDisposition, CycleOutcome, CycleTracker};
pub use render::{HtmlItemTemplate, ItemTemplate, PinToInput, RowStyle, WidthPolicy};

/// The dropdown widget the presenter draws into.
pub trait SuggestionView {
    /// Width of the input box the dropdown is attached to.
    fn input_width(&self) -> usize;

    /// Replaces every row.
    fn show(&mut self, rows: &[String], width: usize);

    /// Restyles rows; `styles[i]` applies to row `i`.
    fn style_rows(&mut self, styles: &[RowStyle]);

    /// Hides the dropdown and drops its rows.
    fn clear(&mut self);
}

/// Moves the hosting page to a new location.
pub trait Navigator {
    fn navigate(&mut self, target_url: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    Idle,
    Querying,
    Rendered,
    Navigating,
}

pub struct SuggestionPresenter<S, V, N> {
    source: Arc<S>,
    view: V,
    navigator: N,
    template: Box<dyn ItemTemplate>,
    width_policy: Box<dyn WidthPolicy>,
    min_query_len: usize,
    tracker: CycleTracker,
    state: PresenterState,
    list: SuggestionList,
    focus: Option<usize>,
    outcomes: mpsc::UnboundedSender<CycleOutcome>,
}

impl<S, V, N> SuggestionPresenter<S, V, N>
where
    S: SuggestionSource + 'static,
    V: SuggestionView,
    N: Navigator,
{
    /// Creates a presenter with [`HtmlItemTemplate`] and [`PinToInput`].
    ///
    /// The returned receiver yields one [`CycleOutcome`] per dispatched
    /// cycle; pass each to [`Self::on_cycle_complete`].
    pub fn new(
        source: Arc<S>,
        view: V,
        navigator: N,
        min_query_len: usize,
    ) -> (Self, mpsc::UnboundedReceiver<CycleOutcome>) {
        let (outcomes, rx) = mpsc::unbounded_channel();
        let presenter = Self {
            source,
            view,
            navigator,
            template: Box::new(HtmlItemTemplate),
            width_policy: Box::new(PinToInput),
            min_query_len,
            tracker: CycleTracker::new(),
            state: PresenterState::Idle,
            list: SuggestionList::empty(),
            focus: None,
            outcomes,
        };
        (presenter, rx)
    }

    #[must_use]
    pub fn with_item_template(mut self, template: impl ItemTemplate + 'static) -> Self {
        self.template = Box::new(template);
        self
    }

    #[must_use]
    pub fn with_width_policy(mut self, policy: impl WidthPolicy + 'static) -> Self {
        self.width_policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn state(&self) -> PresenterState {
        self.state
    }

    /// The list currently on screen (empty when closed).
    #[must_use]
    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    #[must_use]
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Handles a change of the input text.
    ///
    /// Input shorter than the minimum length closes the dropdown and sends
    /// nothing. Otherwise a new cycle is spawned on the current tokio runtime
    /// and its sequence number is returned.
    pub fn on_input(&mut self, term: &str) -> Option<u64> {
        if self.state == PresenterState::Navigating {
            return None;
        }
        if term.chars().count() < self.min_query_len {
            self.close();
            return None;
        }

        let sequence = self.tracker.begin();
        let query = QueryContext::new(term, sequence);
        self.state = PresenterState::Querying;
        tracing::debug!(term, sequence, "dispatching suggestion cycle");

        let source = Arc::clone(&self.source);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let result = source.aggregate(&query).await;
            if outcomes.send(CycleOutcome { query, result }).is_err() {
                tracing::debug!(sequence, "presenter dropped before cycle completed");
            }
        });

        Some(sequence)
    }

    /// Applies a finished cycle if it is still the latest one.
    pub fn on_cycle_complete(&mut self, outcome: CycleOutcome) -> CycleDisposition {
        let sequence = outcome.sequence();
        if self.state == PresenterState::Navigating || !self.tracker.is_current(sequence) {
            tracing::debug!(
                sequence,
                latest = self.tracker.latest(),
                "discarding stale suggestion cycle"
            );
            return CycleDisposition::Stale;
        }

        match outcome.result {
            Ok(list) => {
                self.render(list);
                CycleDisposition::Rendered(self.list.len())
            }
            Err(err) => {
                tracing::warn!(
                    term = outcome.query.term(),
                    sequence,
                    error = %err,
                    "suggestion cycle failed"
                );
                self.list = SuggestionList::empty();
                self.focus = None;
                self.view.clear();
                self.state = PresenterState::Idle;
                CycleDisposition::Failed
            }
        }
    }

    /// Replaces the dropdown rows with `list` and resets focus.
    pub fn render(&mut self, list: SuggestionList) {
        let rows: Vec<String> = list
            .iter()
            .map(|item| self.template.render_item(item))
            .collect();
        let width = self
            .width_policy
            .menu_width(self.view.input_width(), &rows);
        self.view.show(&rows, width);
        self.list = list;
        self.focus = None;
        self.state = PresenterState::Rendered;
    }

    /// Highlights row `index` and resets every other row. Never navigates.
    ///
    /// Returns `false` if `index` is out of range or after a selection.
    pub fn on_focus_change(&mut self, index: usize) -> bool {
        if self.state == PresenterState::Navigating || index >= self.list.len() {
            return false;
        }
        let styles: Vec<RowStyle> = (0..self.list.len())
            .map(|i| {
                if i == index {
                    RowStyle::ACTIVE
                } else {
                    RowStyle::DEFAULT
                }
            })
            .collect();
        self.view.style_rows(&styles);
        self.focus = Some(index);
        true
    }

    /// Navigates to row `index`'s target. The input text is left untouched.
    ///
    /// Returns the target URL, or `None` if `index` is out of range or a
    /// selection has already been made.
    pub fn on_select(&mut self, index: usize) -> Option<String> {
        if self.state == PresenterState::Navigating {
            return None;
        }
        let target = self.list.get(index)?.target_url().to_owned();
        tracing::info!(index, target = %target, "navigating to suggestion");
        self.tracker.invalidate();
        self.state = PresenterState::Navigating;
        self.navigator.navigate(&target);
        Some(target)
    }

    /// The input lost focus or was cleared.
    pub fn on_blur(&mut self) {
        if self.state != PresenterState::Navigating {
            self.close();
        }
    }

    fn close(&mut self) {
        self.tracker.invalidate();
        self.list = SuggestionList::empty();
        self.focus = None;
        self.view.clear();
        self.state = PresenterState::Idle;
    }
}
