//! Normalized suggestion records and the per-cycle list they are assembled
//! into.

use serde::Serialize;

/// Category of a suggestion, used by presenters to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// Geography profile page (full-text `type: "profile"`).
    Profile,
    /// Census table (full-text `type: "table"`).
    Table,
    /// Documentation topic (full-text `type: "topic"`).
    Topic,
    /// Geocoded address.
    Place,
    /// The leading "see all results" entry.
    AllResults,
}

impl SuggestionKind {
    /// Font Awesome icon class for this category, if it has one.
    #[must_use]
    pub fn icon_class(self) -> Option<&'static str> {
        match self {
            SuggestionKind::Profile => Some("fa-bar-chart-o"),
            SuggestionKind::Table => Some("fa-table"),
            SuggestionKind::Topic => Some("fa-book"),
            SuggestionKind::Place => Some("fa-map-marker"),
            SuggestionKind::AllResults => None,
        }
    }

    /// Inline icon markup, e.g. `<i class='fa fa-table dingbat'></i>`.
    #[must_use]
    pub fn marker(self) -> Option<String> {
        self.icon_class()
            .map(|class| format!("<i class='fa {class} dingbat'></i>"))
    }
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionKind::Profile => write!(f, "profile"),
            SuggestionKind::Table => write!(f, "table"),
            SuggestionKind::Topic => write!(f, "topic"),
            SuggestionKind::Place => write!(f, "place"),
            SuggestionKind::AllResults => write!(f, "all_results"),
        }
    }
}

/// One renderable search-result candidate.
///
/// `label` and `value` always hold the same text. Fields are read-only once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    kind: SuggestionKind,
    label: String,
    value: String,
    subline: String,
    target_url: String,
}

impl Suggestion {
    #[must_use]
    pub fn new(
        kind: SuggestionKind,
        text: impl Into<String>,
        subline: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Self {
        let label = text.into();
        Self {
            kind,
            value: label.clone(),
            label,
            subline: subline.into(),
            target_url: target_url.into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> SuggestionKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Descriptive secondary text, without any icon markup.
    #[must_use]
    pub fn subline(&self) -> &str {
        &self.subline
    }

    /// Secondary text prefixed with the category's icon markup.
    #[must_use]
    pub fn subline_with_marker(&self) -> String {
        match self.kind.marker() {
            Some(marker) => format!("{marker} {}", self.subline),
            None => self.subline.clone(),
        }
    }

    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }
}

/// Immutable snapshot of the search term for one query cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    term: String,
    sequence: u64,
}

impl QueryContext {
    #[must_use]
    pub fn new(term: impl Into<String>, sequence: u64) -> Self {
        Self {
            term: term.into(),
            sequence,
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Sequence number of the cycle that captured this term.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Ordered suggestions for one cycle: fallback entry, then full-text results,
/// then geocode results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuggestionList {
    #[serde(skip)]
    geocode_start: usize,
    items: Vec<Suggestion>,
}

impl SuggestionList {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds `[fallback] ++ full_text ++ geocode`.
    ///
    /// Callers are responsible for capping `full_text`; `geocode` is kept
    /// whole.
    #[must_use]
    pub fn assemble(
        fallback: Suggestion,
        full_text: Vec<Suggestion>,
        geocode: Vec<Suggestion>,
    ) -> Self {
        let mut items = Vec::with_capacity(1 + full_text.len() + geocode.len());
        items.push(fallback);
        items.extend(full_text);
        let geocode_start = items.len();
        items.extend(geocode);
        Self {
            geocode_start,
            items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Suggestion> {
        self.items.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Suggestion> {
        self.items.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Suggestion> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Suggestion] {
        &self.items
    }

    /// Full-text suggestions (between the fallback entry and the geocode block).
    #[must_use]
    pub fn full_text(&self) -> &[Suggestion] {
        if self.items.is_empty() {
            return &[];
        }
        &self.items[1..self.geocode_start]
    }

    /// Geocode suggestions (always the tail of the list).
    #[must_use]
    pub fn geocode(&self) -> &[Suggestion] {
        &self.items[self.geocode_start..]
    }
}

impl<'a> IntoIterator for &'a SuggestionList {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
