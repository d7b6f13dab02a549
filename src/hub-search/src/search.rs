//! Search dispatch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{SearchApi, SearchOptions};
use crate::entity::EntityType;
use crate::error::{SearchError, SearchResult};
use crate::query::Query;
use crate::result::SearchResponse;

/// Executes queries for one or more entity types.
///
/// Implementations talk to the actual search services. [`HubSearch`] is
/// itself a backend, so anything that accepts a backend can be handed the
/// dispatcher.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Runs a query and returns one page of results.
    async fn search(&self, query: &Query, options: &SearchOptions) -> SearchResult<SearchResponse>;
}

/// Closed-world dispatcher routing queries to registered backends.
///
/// Routing depends only on the query's target entity and the options'
/// API. Unregistered combinations fail instead of returning no results.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use hub_search::{EntityType, HubSearch, SearchApi, SearchBackend};
///
/// fn build(items: Arc<dyn SearchBackend>, groups: Arc<dyn SearchBackend>) -> HubSearch {
///     HubSearch::builder()
///         .backend(SearchApi::Portal, EntityType::Item, items)
///         .backend(SearchApi::Portal, EntityType::Group, groups)
///         .build()
/// }
/// ```
#[derive(Clone, Default)]
pub struct HubSearch {
    backends: HashMap<(SearchApi, EntityType), Arc<dyn SearchBackend>>,
}

impl fmt::Debug for HubSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<String> = self
            .backends
            .keys()
            .map(|(api, entity)| format!("{api}/{entity}"))
            .collect();
        routes.sort();
        f.debug_struct("HubSearch").field("routes", &routes).finish()
    }
}

impl HubSearch {
    /// Creates a dispatcher with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for registering backends.
    pub fn builder() -> HubSearchBuilder {
        HubSearchBuilder::default()
    }

    /// True when a backend handles `entity` on `api`.
    pub fn supports(&self, api: SearchApi, entity: EntityType) -> bool {
        self.backends.contains_key(&(api, entity))
    }

    /// Validates and routes a query to its backend.
    pub async fn hub_search(
        &self,
        query: &Query,
        options: &SearchOptions,
    ) -> SearchResult<SearchResponse> {
        if query.filters.is_empty() {
            return Err(SearchError::MissingFilters);
        }

        let entity = query.target_entity;
        let backend = self.backends.get(&(options.api, entity)).ok_or_else(|| {
            tracing::debug!("No search backend for {} on {}", entity, options.api);
            SearchError::NotImplemented {
                entity,
                api: options.api,
            }
        })?;

        tracing::debug!(
            "Dispatching {} search to {} (start {}, num {})",
            entity,
            options.api,
            options.start,
            options.num
        );
        backend.search(query, options).await
    }

    /// Fetches the page following `previous`, if there is one.
    pub async fn next(
        &self,
        query: &Query,
        options: &SearchOptions,
        previous: &SearchResponse,
    ) -> SearchResult<Option<SearchResponse>> {
        match previous.next_options(options) {
            Some(next) => self.hub_search(query, &next).await.map(Some),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SearchBackend for HubSearch {
    async fn search(&self, query: &Query, options: &SearchOptions) -> SearchResult<SearchResponse> {
        self.hub_search(query, options).await
    }
}

/// Builder for creating `HubSearch` instances.
#[derive(Default)]
pub struct HubSearchBuilder {
    backends: HashMap<(SearchApi, EntityType), Arc<dyn SearchBackend>>,
}

impl HubSearchBuilder {
    /// Registers a backend for one entity type on one API.
    pub fn backend(
        mut self,
        api: SearchApi,
        entity: EntityType,
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        self.backends.insert((api, entity), backend);
        self
    }

    /// Registers a backend for several entity types on one API.
    pub fn backend_for(
        mut self,
        api: SearchApi,
        entities: &[EntityType],
        backend: Arc<dyn SearchBackend>,
    ) -> Self {
        for entity in entities {
            self.backends.insert((api, *entity), Arc::clone(&backend));
        }
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> HubSearch {
        HubSearch {
            backends: self.backends,
        }
    }
}
