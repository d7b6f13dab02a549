//! Error types for query composition and search dispatch.

use crate::config::SearchApi;
use crate::entity::EntityType;

/// Result type alias for search operations.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while composing or executing a search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// More than one filter carries a predicate that may only appear once.
    #[error("Only 1 IFilter can have a '{field}' predicate but {count} were detected")]
    MultipleFilters { field: String, count: usize },

    /// A single filter carries the same top-level predicate more than once.
    #[error("Only 1 '{field}' predicate is allowed but {count} were detected")]
    MultiplePredicates { field: String, count: usize },

    /// A top-level predicate sits in an OR filter next to other predicates.
    #[error("'{field}' predicates cannot be OR'd to other predicates")]
    OrPredicate { field: String },

    /// A top-level predicate holds an array or match options.
    #[error(
        "'{field}' predicate must be a string or boolean primitive. string[] and IMatchOptions are not allowed."
    )]
    NotPrimitive { field: String },

    /// Queries with different target entities were combined.
    #[error("Cannot combine queries for different entity types")]
    MixedEntityTypes,

    /// No queries were given to combine.
    #[error("Cannot combine an empty list of queries")]
    NoQueries,

    /// A query without filters was dispatched.
    #[error("Query must contain at least one Filter")]
    MissingFilters,

    /// No backend is registered for the entity type and api.
    #[error("Search via \"{entity}\" filter against \"{api}\" api is not implemented")]
    NotImplemented { entity: EntityType, api: SearchApi },

    /// The backend failed to execute the search.
    #[error("Search backend error: {0}")]
    Backend(String),

    /// I/O error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SearchError {
    /// Creates a new `Backend` error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Returns true for errors raised while validating a query rather than
    /// while executing it.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MultipleFilters { .. }
                | Self::MultiplePredicates { .. }
                | Self::OrPredicate { .. }
                | Self::NotPrimitive { .. }
                | Self::MixedEntityTypes
                | Self::NoQueries
                | Self::MissingFilters
        )
    }
}
