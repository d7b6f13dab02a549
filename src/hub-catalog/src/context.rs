//! Collaborators used by containment checks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use hub_search::{RequestOptions, SearchBackend, SearchOptions};
use serde_json::Value;

use crate::error::{CatalogError, CatalogResult};
use crate::types::HubCatalog;

/// Loads the catalog owned by an entity.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetches the catalog of the entity `id`. Fails if it is inaccessible.
    async fn fetch_catalog(&self, id: &str, options: &RequestOptions) -> CatalogResult<HubCatalog>;
}

/// Serves catalogs from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogFetcher {
    catalogs: HashMap<String, HubCatalog>,
}

impl InMemoryCatalogFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog for the entity `id`.
    pub fn with_catalog(mut self, id: impl Into<String>, catalog: HubCatalog) -> Self {
        self.catalogs.insert(id.into(), catalog);
        self
    }

    /// Adds a catalog stored as JSON, upgrading legacy catalogs.
    pub fn with_catalog_value(self, id: impl Into<String>, value: Value) -> CatalogResult<Self> {
        let catalog = HubCatalog::from_value(value)?;
        Ok(self.with_catalog(id, catalog))
    }
}

#[async_trait]
impl CatalogFetcher for InMemoryCatalogFetcher {
    async fn fetch_catalog(&self, id: &str, _options: &RequestOptions) -> CatalogResult<HubCatalog> {
        self.catalogs
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }
}

/// Everything a catalog needs to answer questions about its content.
///
/// Cloning is cheap; collaborators are shared.
#[derive(Clone)]
pub struct HubContext {
    search: Arc<dyn SearchBackend>,
    fetcher: Arc<dyn CatalogFetcher>,
    search_options: SearchOptions,
}

impl fmt::Debug for HubContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubContext")
            .field("search_options", &self.search_options)
            .finish_non_exhaustive()
    }
}

impl HubContext {
    /// Creates a context with default search options.
    pub fn new(search: Arc<dyn SearchBackend>, fetcher: Arc<dyn CatalogFetcher>) -> Self {
        Self {
            search,
            fetcher,
            search_options: SearchOptions::default(),
        }
    }

    /// Sets the search options used for every search.
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    pub fn search(&self) -> &Arc<dyn SearchBackend> {
        &self.search
    }

    pub fn fetcher(&self) -> &Arc<dyn CatalogFetcher> {
        &self.fetcher
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.search_options
    }

    pub fn request_options(&self) -> &RequestOptions {
        &self.search_options.request_options
    }

    /// Fetches the catalog of the entity `id`.
    pub async fn fetch_catalog(&self, id: &str) -> CatalogResult<HubCatalog> {
        tracing::debug!("Fetching catalog for {}", id);
        self.fetcher.fetch_catalog(id, self.request_options()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CATALOG_SCHEMA_VERSION;
    use hub_search::{EntityType, get_predicate_values};
    use serde_json::json;

    #[tokio::test]
    async fn test_in_memory_fetcher() {
        let fetcher =
            InMemoryCatalogFetcher::new().with_catalog("00a", HubCatalog::new().with_title("A"));
        let options = RequestOptions::default();

        let catalog = fetcher.fetch_catalog("00a", &options).await.unwrap();
        assert_eq!(catalog.title.as_deref(), Some("A"));

        let err = fetcher.fetch_catalog("00b", &options).await.unwrap_err();
        assert_eq!(err.to_string(), "Catalog not found: 00b");
    }

    #[tokio::test]
    async fn test_stored_legacy_catalog_is_upgraded() {
        let fetcher = InMemoryCatalogFetcher::new()
            .with_catalog_value("00a", json!({ "groups": ["g1"], "orgId": "org1" }))
            .unwrap();

        let catalog = fetcher
            .fetch_catalog("00a", &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(catalog.schema_version, CATALOG_SCHEMA_VERSION);
        assert_eq!(catalog.title.as_deref(), Some("Default Catalog"));
        let scope = &catalog.scopes[&EntityType::Item];
        assert_eq!(get_predicate_values("group", scope)[0].as_str(), Some("g1"));
        assert_eq!(get_predicate_values("orgid", scope)[0].as_str(), Some("org1"));
    }

    #[test]
    fn test_malformed_stored_catalog_fails() {
        let result = InMemoryCatalogFetcher::new()
            .with_catalog_value("00a", json!({ "schemaVersion": 1, "scopes": "nope" }));
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }
}
