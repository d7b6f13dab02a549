//! Error types for hub-catalog.

use hub_search::{EntityType, SearchError};
use thiserror::Error;

/// Catalog error types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Search failed while checking containment.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// No catalog exists for the id.
    #[error("Catalog not found: {0}")]
    NotFound(String),

    /// The fetcher failed to load a catalog.
    #[error("Failed to fetch catalog '{id}': {reason}")]
    Fetch { id: String, reason: String },

    /// A catalog path has an odd number of segments.
    #[error("Path does not contain an even number of parts.")]
    OddPathParts,

    /// A catalog path could not be interpreted.
    #[error("Invalid catalog path: {0}")]
    InvalidPath(String),

    /// The catalog defines no scope for the entity type.
    #[error("Catalog has no scope for entity type '{0}'")]
    NoScope(EntityType),

    /// The catalog defines no collection with the key.
    #[error("Collection '{0}' not found")]
    CollectionNotFound(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Creates a new `Fetch` error.
    pub fn fetch(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
