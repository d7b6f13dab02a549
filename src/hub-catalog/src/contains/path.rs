//! Parsing catalog paths into containment hierarchies.

use hub_search::EntityType;

use crate::error::{CatalogError, CatalogResult};
use crate::types::DeepCatalogInfo;

/// Maps a plural path segment to its hub and search entity types.
fn segment_entity(segment: &str) -> Option<(&'static str, EntityType)> {
    let entity = match segment {
        "sites" => ("site", EntityType::Item),
        "initiatives" => ("initiative", EntityType::Item),
        "projects" => ("project", EntityType::Item),
        "pages" => ("page", EntityType::Item),
        "discussions" => ("discussion", EntityType::Item),
        "content" => ("content", EntityType::Item),
        "templates" => ("template", EntityType::Item),
        "surveys" => ("survey", EntityType::Item),
        "groups" => ("group", EntityType::Group),
        "events" => ("event", EntityType::Event),
        _ => return None,
    };
    Some(entity)
}

/// Parses a `type/id/type/id/...` path into a hierarchy.
///
/// The path reads outermost first (`sites/00a/projects/00c`); the
/// hierarchy is returned innermost first, the order containment is checked
/// in.
pub fn path_to_catalog_info(path: &str) -> CatalogResult<Vec<DeepCatalogInfo>> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() % 2 != 0 {
        return Err(CatalogError::OddPathParts);
    }

    let mut hierarchy = Vec::with_capacity(parts.len() / 2);
    for pair in parts.chunks(2) {
        let (segment, id) = (pair[0], pair[1]);
        let (hub_entity_type, entity_type) = segment_entity(segment)
            .ok_or_else(|| CatalogError::InvalidPath(format!("unknown segment '{segment}'")))?;
        if id.is_empty() {
            return Err(CatalogError::InvalidPath(format!("missing id after '{segment}'")));
        }
        hierarchy.push(DeepCatalogInfo::new(id, entity_type).with_hub_entity_type(hub_entity_type));
    }

    hierarchy.reverse();
    Ok(hierarchy)
}
