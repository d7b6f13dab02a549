//! Containment across nested catalogs.

use std::time::Instant;

use hub_search::EntityType;

use super::path::path_to_catalog_info;
use crate::catalog::Catalog;
use crate::context::HubContext;
use crate::error::{CatalogError, CatalogResult};
use crate::types::{CatalogInfoEntry, ContainsOptions, ContainsResponse, DeepCatalogInfo, HubCatalog};

/// Id given to a root catalog appended to a parsed path.
pub const ROOT_CATALOG_ID: &str = "root";

/// Reason reported for path failures other than an odd segment count.
pub const PATH_PARSE_ERROR: &str = "An error occurred while parsing path.";

/// Checks that `identifier` is reachable through every level of `hierarchy`.
///
/// `hierarchy` is ordered innermost first. The first level must contain
/// `identifier`, each following level must contain the owner of the level
/// before it. Levels are resolved and checked one at a time and the walk
/// stops at the first level that does not contain its child.
///
/// Catalogs that had to be fetched are returned in `catalog_info` so the
/// caller can pass them back in on the next call.
pub async fn deep_contains(
    identifier: &str,
    entity_type: EntityType,
    hierarchy: &[DeepCatalogInfo],
    context: &HubContext,
) -> CatalogResult<ContainsResponse> {
    let start = Instant::now();
    let mut response = ContainsResponse::new(identifier);
    if hierarchy.is_empty() {
        return Ok(response);
    }

    let mut child_id = identifier;
    let mut child_type = entity_type;
    for info in hierarchy {
        let catalog = match &info.catalog {
            Some(catalog) => Catalog::from_json(catalog.clone(), context.clone()),
            None => Catalog::init(&info.id, context.clone()).await?,
        };
        response.catalog_info.insert(
            info.id.clone(),
            CatalogInfoEntry {
                id: info.id.clone(),
                entity_type: info.entity_type,
                catalog: catalog.to_json(),
            },
        );

        let level = catalog
            .contains(child_id, &ContainsOptions::for_entity(child_type))
            .await?;
        response.is_contained = level.is_contained;
        if !level.is_contained {
            response.reason = Some(format!(
                "'{child_id}' is not contained in catalog '{}'",
                info.id
            ));
            break;
        }

        child_id = info.id.as_str();
        child_type = info.entity_type;
    }

    response.duration = start.elapsed().as_millis() as u64;
    tracing::debug!(
        "Deep containment of {} across {} levels: {}",
        identifier,
        hierarchy.len(),
        response.is_contained
    );
    Ok(response)
}

/// Checks containment along a `type/id/...` path.
///
/// Path problems are reported in the response's `reason` instead of as
/// errors. A `root_catalog` is checked last, above the outermost level.
pub async fn deep_catalog_contains(
    identifier: &str,
    entity_type: EntityType,
    path: &str,
    context: &HubContext,
    root_catalog: Option<HubCatalog>,
) -> CatalogResult<ContainsResponse> {
    let mut hierarchy = match path_to_catalog_info(path) {
        Ok(hierarchy) => hierarchy,
        Err(err @ CatalogError::OddPathParts) => {
            tracing::warn!("Invalid catalog path '{}': {}", path, err);
            return Ok(ContainsResponse::new(identifier).with_reason(err.to_string()));
        }
        Err(err) => {
            tracing::warn!("Invalid catalog path '{}': {}", path, err);
            return Ok(ContainsResponse::new(identifier).with_reason(PATH_PARSE_ERROR));
        }
    };

    if let Some(root) = root_catalog {
        hierarchy.push(
            DeepCatalogInfo::new(ROOT_CATALOG_ID, EntityType::Item)
                .with_hub_entity_type("site")
                .with_catalog(root),
        );
    }

    deep_contains(identifier, entity_type, &hierarchy, context).await
}
