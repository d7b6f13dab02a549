//! Catalog data types.
//!
//! Contains the plain data structures exchanged with callers:
//! - `HubCatalog` - Scopes and collections defining a catalog's content
//! - `HubCollection` - Named, narrower view of a catalog
//! - `DeepCatalogInfo` - One level of a containment hierarchy
//! - `ContainsResponse` - Outcome of a containment check

use std::collections::BTreeMap;

use hub_search::{EntityType, Query, SortDirection};
use serde::{Deserialize, Serialize};

/// Current catalog schema version.
pub const CATALOG_SCHEMA_VERSION: u32 = 1;

/// Definition of what a catalog contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub schema_version: u32,
    /// Per entity type query defining the catalog's content.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<EntityType, Query>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<HubCollection>,
}

impl Default for HubCatalog {
    fn default() -> Self {
        Self {
            title: None,
            schema_version: CATALOG_SCHEMA_VERSION,
            scopes: BTreeMap::new(),
            collections: Vec::new(),
        }
    }
}

impl HubCatalog {
    /// Creates an empty catalog at the current schema version.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the scope for the query's target entity.
    pub fn with_scope(mut self, scope: Query) -> Self {
        self.scopes.insert(scope.target_entity, scope);
        self
    }

    pub fn with_collection(mut self, collection: HubCollection) -> Self {
        self.collections.push(collection);
        self
    }
}

/// Named sub-query of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubCollection {
    pub key: String,
    pub label: String,
    pub scope: Query,
    pub target_entity: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl HubCollection {
    /// Creates a collection whose target entity follows its scope.
    pub fn new(key: impl Into<String>, label: impl Into<String>, scope: Query) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            target_entity: scope.target_entity,
            scope,
            include: None,
            sort_field: None,
            sort_direction: None,
        }
    }
}

/// Options for a containment check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainsOptions {
    /// Entity type of the identifier. When omitted every scope is checked.
    pub entity_type: Option<EntityType>,
}

impl ContainsOptions {
    /// Options checking a single entity type.
    pub fn for_entity(entity_type: EntityType) -> Self {
        Self {
            entity_type: Some(entity_type),
        }
    }
}

/// One level of a containment hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepCatalogInfo {
    /// Id of the entity owning the catalog.
    pub id: String,
    /// Search entity type of the owning entity.
    pub entity_type: EntityType,
    /// Hub entity type of the owning entity (site, initiative, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_entity_type: Option<String>,
    /// Previously fetched catalog. Fetched when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<HubCatalog>,
}

impl DeepCatalogInfo {
    /// Creates an entry whose catalog will be fetched.
    pub fn new(id: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            id: id.into(),
            entity_type,
            hub_entity_type: None,
            catalog: None,
        }
    }

    pub fn with_hub_entity_type(mut self, hub_entity_type: impl Into<String>) -> Self {
        self.hub_entity_type = Some(hub_entity_type.into());
        self
    }

    /// Supplies the catalog so it is not fetched.
    pub fn with_catalog(mut self, catalog: HubCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

/// Catalog resolved while walking a hierarchy, returned for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfoEntry {
    pub id: String,
    pub entity_type: EntityType,
    pub catalog: HubCatalog,
}

impl From<CatalogInfoEntry> for DeepCatalogInfo {
    fn from(entry: CatalogInfoEntry) -> Self {
        DeepCatalogInfo::new(entry.id, entry.entity_type).with_catalog(entry.catalog)
    }
}

/// Outcome of a containment check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainsResponse {
    pub identifier: String,
    pub is_contained: bool,
    /// Catalogs resolved during the check, keyed by owning entity id.
    #[serde(default)]
    pub catalog_info: BTreeMap<String, CatalogInfoEntry>,
    /// Wall-clock milliseconds spent.
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ContainsResponse {
    /// A response for `identifier` that is not (yet) contained.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            is_contained: false,
            catalog_info: BTreeMap::new(),
            duration: 0,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
