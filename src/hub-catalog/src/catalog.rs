//! The `Catalog` value object.

use std::collections::BTreeMap;
use std::time::Instant;

use hub_search::{EntityType, Query, SearchResponse, combine_queries};

use crate::context::HubContext;
use crate::error::{CatalogError, CatalogResult};
use crate::identifier::identifier_predicate;
use crate::types::{ContainsOptions, ContainsResponse, HubCatalog, HubCollection};

/// A catalog bound to the collaborators needed to query it.
///
/// # Example
///
/// ```no_run
/// use hub_catalog::{Catalog, ContainsOptions, HubContext};
/// use hub_search::EntityType;
///
/// async fn check(context: HubContext) -> hub_catalog::CatalogResult<bool> {
///     let catalog = Catalog::init("00a", context).await?;
///     let response = catalog
///         .contains("org|parks", &ContainsOptions::for_entity(EntityType::Item))
///         .await?;
///     Ok(response.is_contained)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    catalog: HubCatalog,
    context: HubContext,
}

impl Catalog {
    /// Wraps an existing catalog definition.
    pub fn from_json(catalog: HubCatalog, context: HubContext) -> Self {
        Self { catalog, context }
    }

    /// Fetches the catalog owned by the entity `id`.
    pub async fn init(id: &str, context: HubContext) -> CatalogResult<Self> {
        let catalog = context.fetch_catalog(id).await?;
        Ok(Self::from_json(catalog, context))
    }

    /// Snapshot of the catalog definition.
    pub fn to_json(&self) -> HubCatalog {
        self.catalog.clone()
    }

    pub fn title(&self) -> Option<&str> {
        self.catalog.title.as_deref()
    }

    pub fn schema_version(&self) -> u32 {
        self.catalog.schema_version
    }

    pub fn scopes(&self) -> &BTreeMap<EntityType, Query> {
        &self.catalog.scopes
    }

    pub fn collections(&self) -> &[HubCollection] {
        &self.catalog.collections
    }

    /// Entity types that have a scope.
    pub fn available_scopes(&self) -> Vec<EntityType> {
        self.catalog.scopes.keys().copied().collect()
    }

    pub fn get_scope(&self, entity_type: EntityType) -> Option<&Query> {
        self.catalog.scopes.get(&entity_type)
    }

    pub fn get_collection(&self, key: &str) -> Option<&HubCollection> {
        self.catalog.collections.iter().find(|c| c.key == key)
    }

    pub fn collection_names(&self) -> Vec<&str> {
        self.catalog
            .collections
            .iter()
            .map(|c| c.key.as_str())
            .collect()
    }

    /// Scope queries a containment check runs for `entity_type`.
    ///
    /// A scope wins over collections; without one the first collection
    /// targeting the entity type stands in. Without an entity type every
    /// scope is used.
    fn containment_scopes(&self, entity_type: Option<EntityType>) -> Vec<&Query> {
        match entity_type {
            Some(entity_type) => self
                .get_scope(entity_type)
                .or_else(|| {
                    self.catalog
                        .collections
                        .iter()
                        .find(|c| c.target_entity == entity_type)
                        .map(|c| &c.scope)
                })
                .into_iter()
                .collect(),
            None => self.catalog.scopes.values().collect(),
        }
    }

    /// Checks whether the entity named by `identifier` is in this catalog.
    ///
    /// `identifier` is an id or a slug. Every candidate scope is searched,
    /// even after a match; the entity is contained if any search returns a
    /// result. Search errors are returned as is.
    pub async fn contains(
        &self,
        identifier: &str,
        options: &ContainsOptions,
    ) -> CatalogResult<ContainsResponse> {
        let start = Instant::now();
        let mut response = ContainsResponse::new(identifier);

        let scopes = self.containment_scopes(options.entity_type);
        if scopes.is_empty() {
            tracing::debug!(
                "Catalog has no scope for {:?}; {} is not contained",
                options.entity_type,
                identifier
            );
            return Ok(response);
        }

        let predicate = identifier_predicate(identifier);
        let mut search_options = self.context.search_options().clone();
        search_options.num = 1;

        for scope in scopes {
            let query = scope.clone().with_predicate(predicate.clone());
            let results = self.context.search().search(&query, &search_options).await?;
            if !results.is_empty() {
                response.is_contained = true;
            }
        }

        response.duration = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "{} contained in catalog: {} ({}ms)",
            identifier,
            response.is_contained,
            response.duration
        );
        Ok(response)
    }

    /// Searches within the catalog's scope for the query's entity type.
    pub async fn search(&self, query: &Query) -> CatalogResult<SearchResponse> {
        let scope = self
            .get_scope(query.target_entity)
            .ok_or(CatalogError::NoScope(query.target_entity))?;
        let combined = combine_queries(&[scope.clone(), query.clone()])?;
        Ok(self
            .context
            .search()
            .search(&combined, self.context.search_options())
            .await?)
    }

    /// Searches within a named collection, applying its sort and includes.
    pub async fn search_collection(&self, key: &str, query: &Query) -> CatalogResult<SearchResponse> {
        let collection = self
            .get_collection(key)
            .ok_or_else(|| CatalogError::CollectionNotFound(key.to_string()))?;
        let combined = combine_queries(&[collection.scope.clone(), query.clone()])?;

        let mut options = self.context.search_options().clone();
        if let Some(field) = &collection.sort_field {
            options.sort_field = Some(field.clone());
        }
        if let Some(direction) = collection.sort_direction {
            options.sort_order = Some(direction);
        }
        if let Some(include) = &collection.include {
            options.include = include.clone();
        }

        Ok(self.context.search().search(&combined, &options).await?)
    }
}
