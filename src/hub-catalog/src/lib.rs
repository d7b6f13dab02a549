#![allow(clippy::missing_errors_doc, clippy::uninlined_format_args)]
//! Hub Catalog - containment checks across nested Hub catalogs.
//!
//! A catalog describes what a Hub entity (a site, initiative, project, ...)
//! contains as one scope query per entity type, plus optional named
//! collections. This crate answers whether an item, group or event is
//! inside a catalog, and whether it is reachable through a chain of nested
//! catalogs such as `sites/00a/initiatives/00b/projects/00c`.
//!
//! # Features
//!
//! - [`Catalog`] wrapping a catalog definition with search helpers
//! - Single catalog checks with [`catalog_contains`]
//! - Hierarchy checks with [`deep_contains`] and [`deep_catalog_contains`]
//! - Legacy `{groups, orgId}` catalog upgrade with [`HubCatalog::from_value`]
//! - Pluggable catalog loading with [`CatalogFetcher`]
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hub_catalog::{HubContext, InMemoryCatalogFetcher, deep_catalog_contains};
//! use hub_search::{EntityType, SearchBackend};
//!
//! async fn check(search: Arc<dyn SearchBackend>) -> hub_catalog::CatalogResult<()> {
//!     let context = HubContext::new(search, Arc::new(InMemoryCatalogFetcher::new()));
//!     let response = deep_catalog_contains(
//!         "org|parks",
//!         EntityType::Item,
//!         "sites/00a/projects/00c",
//!         &context,
//!         None,
//!     )
//!     .await?;
//!     if !response.is_contained {
//!         println!("{}", response.reason.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod contains;
pub mod context;
pub mod error;
pub mod identifier;
mod schema;
pub mod types;

pub use catalog::Catalog;
pub use contains::{
    PATH_PARSE_ERROR, ROOT_CATALOG_ID, catalog_contains, deep_catalog_contains, deep_contains,
    path_to_catalog_info,
};
pub use context::{CatalogFetcher, HubContext, InMemoryCatalogFetcher};
pub use error::{CatalogError, CatalogResult};
pub use identifier::{SLUG_FIELD, SLUG_PREFIX, identifier_predicate, is_guid};
pub use types::{
    CATALOG_SCHEMA_VERSION, CatalogInfoEntry, ContainsOptions, ContainsResponse, DeepCatalogInfo,
    HubCatalog, HubCollection,
};
