//! Search response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SearchOptions;

/// A single search hit.
///
/// Only `id` is interpreted by this crate; everything else the backend
/// returns is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSearchResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HubSearchResult {
    /// Creates a result with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            extra: Map::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Count of results sharing a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationValue {
    pub value: Value,
    pub count: u64,
}

/// Aggregated counts for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub field: String,
    pub values: Vec<AggregationValue>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<HubSearchResult>,
    /// Total number of matches across all pages.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub has_next: bool,
    /// Start index of the next page, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<Aggregation>,
}

impl SearchResponse {
    /// Creates a single, final page.
    pub fn from_results(results: Vec<HubSearchResult>) -> Self {
        Self {
            total: results.len() as u64,
            results,
            ..Default::default()
        }
    }

    /// True when the page holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Options for fetching the page after this one.
    ///
    /// Falls back to `start + num` when the backend reported more results
    /// without a start index.
    pub fn next_options(&self, options: &SearchOptions) -> Option<SearchOptions> {
        if !self.has_next {
            return None;
        }
        let start = self
            .next_start
            .unwrap_or_else(|| options.start.saturating_add(options.num));
        let mut next = options.clone();
        next.start = start;
        Some(next)
    }
}
