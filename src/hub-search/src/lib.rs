#![allow(clippy::missing_errors_doc, clippy::uninlined_format_args)]
//! Hub Search - search query model, composition helpers and dispatch.
//!
//! Queries target a single [`EntityType`] and hold a list of [`Filter`]s,
//! each combining [`Predicate`]s with AND or OR. Filters within a query are
//! always ANDed.
//!
//! # Features
//!
//! - Typed predicate values (primitives, lists, match options, dates)
//! - Hoisting of single-use predicates with [`get_top_level_predicate`]
//! - Value collection with [`get_predicate_values`]
//! - Query merging with [`combine_queries`]
//! - Closed-world routing of queries to backends with [`HubSearch`]
//! - TOML configuration with [`HubConfig`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hub_search::{EntityType, HubConfig, HubSearch, Predicate, Query, SearchApi, SearchBackend};
//!
//! async fn run(items: Arc<dyn SearchBackend>) -> hub_search::SearchResult<()> {
//!     let search = HubSearch::builder()
//!         .backend(SearchApi::Portal, EntityType::Item, items)
//!         .build();
//!
//!     let query = Query::new(EntityType::Item).with_predicate(Predicate::field("term", "parks"));
//!     let options = HubConfig::default().search_options();
//!     let response = search.hub_search(&query, &options).await?;
//!     println!("{} results", response.total);
//!     Ok(())
//! }
//! ```

mod combine;
mod config;
mod entity;
mod error;
mod extract;
mod predicate;
mod query;
mod result;
mod search;

pub use combine::combine_queries;
pub use config::{
    HubConfig, RequestOptions, SearchApi, SearchOptions, SearchOptionsBuilder, SortDirection,
};
pub use entity::EntityType;
pub use error::{SearchError, SearchResult};
pub use extract::{get_predicate_values, get_predicate_values_in, get_top_level_predicate};
pub use predicate::{
    DateValue, MatchBucket, MatchOptions, Predicate, PredicateValue, Primitive, RelativeDateUnit,
};
pub use query::{Filter, FilterOperation, Query};
pub use result::{Aggregation, AggregationValue, HubSearchResult, SearchResponse};
pub use search::{HubSearch, HubSearchBuilder, SearchBackend};

/// Re-export async_trait for backend implementors
pub use async_trait::async_trait;
