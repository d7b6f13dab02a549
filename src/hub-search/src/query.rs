//! Filters and queries.
//!
//! A [`Query`] targets one [`EntityType`] and carries a list of
//! [`Filter`]s. Filters are always ANDed with each other; the predicates
//! inside a filter are combined with the filter's own operation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::EntityType;
use crate::predicate::Predicate;

/// How the predicates of a filter are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperation {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// One clause of a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub operation: FilterOperation,
    #[serde(default)]
    pub predicates: Vec<Predicate>,
}

impl Filter {
    /// Creates a filter whose predicates are ANDed.
    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            operation: FilterOperation::And,
            predicates: predicates.into_iter().collect(),
        }
    }

    /// Creates a filter whose predicates are ORed.
    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self {
            operation: FilterOperation::Or,
            predicates: predicates.into_iter().collect(),
        }
    }

    /// True when any predicate has a value for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.predicates.iter().any(|p| p.has_value(field))
    }
}

/// A search query against a single entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Entity type the query searches.
    pub target_entity: EntityType,
    /// Named predefined filter mixed into the query by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Free-form properties passed through to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl Query {
    /// Creates a query with no filters.
    pub fn new(target_entity: EntityType) -> Self {
        Self {
            target_entity,
            collection: None,
            filters: Vec::new(),
            properties: None,
        }
    }

    /// Appends a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Appends a filter holding only `predicate`.
    pub fn with_predicate(self, predicate: Predicate) -> Self {
        self.with_filter(Filter::and([predicate]))
    }

    /// Sets the named collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Sets a pass-through property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Iterates every predicate of every filter.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.filters.iter().flat_map(|f| f.predicates.iter())
    }
}
