//! Upgrading legacy catalogs to the current schema.

use hub_search::{EntityType, Filter, Predicate, PredicateValue, Query};
use serde_json::Value;

use crate::error::CatalogResult;
use crate::types::{CATALOG_SCHEMA_VERSION, HubCatalog};

const DEFAULT_TITLE: &str = "Default Catalog";

impl HubCatalog {
    /// Reads a catalog, upgrading the legacy `{groups, orgId}` shape.
    ///
    /// Legacy catalogs become a single item scope restricted to the listed
    /// groups and organization.
    pub fn from_value(value: Value) -> CatalogResult<HubCatalog> {
        let version = value.get("schemaVersion").and_then(Value::as_u64);
        if version == Some(u64::from(CATALOG_SCHEMA_VERSION)) {
            return Ok(serde_json::from_value(value)?);
        }

        let groups: Vec<String> = match value.get("groups") {
            Some(Value::String(group)) => vec![group.clone()],
            Some(Value::Array(groups)) => groups
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };
        let org_id = value
            .get("orgId")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        let mut predicates = Vec::new();
        if !groups.is_empty() {
            predicates.push(Predicate::field("group", PredicateValue::from(groups)));
        }
        if let Some(org_id) = org_id {
            predicates.push(Predicate::field("orgid", org_id));
        }

        let mut catalog = HubCatalog::new().with_title(DEFAULT_TITLE);
        if !predicates.is_empty() {
            tracing::debug!("Upgrading legacy catalog to schema {}", CATALOG_SCHEMA_VERSION);
            catalog = catalog.with_scope(Query::new(EntityType::Item).with_filter(Filter::and(predicates)));
        }
        Ok(catalog)
    }
}
