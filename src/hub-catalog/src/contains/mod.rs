//! Containment checks.
//!
//! # Module Structure
//!
//! - [`path`] - Parsing `type/id/...` paths into hierarchies
//! - [`deep`] - Walking a hierarchy of nested catalogs

mod deep;
mod path;
#[cfg(test)]
mod tests;

pub use deep::{PATH_PARSE_ERROR, ROOT_CATALOG_ID, deep_catalog_contains, deep_contains};
pub use path::path_to_catalog_info;

use crate::catalog::Catalog;
use crate::context::HubContext;
use crate::error::CatalogResult;
use crate::types::{ContainsOptions, ContainsResponse, HubCatalog};

/// Checks whether `catalog` contains the entity named by `identifier`.
pub async fn catalog_contains(
    identifier: &str,
    catalog: &HubCatalog,
    context: &HubContext,
    options: &ContainsOptions,
) -> CatalogResult<ContainsResponse> {
    Catalog::from_json(catalog.clone(), context.clone())
        .contains(identifier, options)
        .await
}
