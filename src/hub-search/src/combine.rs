//! Query combination.

use crate::error::{SearchError, SearchResult};
use crate::query::Query;

/// Merges queries for the same entity type into one.
///
/// Filters are concatenated in input order; since filters are ANDed, the
/// result matches what every input matches. The first collection wins and
/// properties are merged with later keys overriding earlier ones.
pub fn combine_queries(queries: &[Query]) -> SearchResult<Query> {
    let (first, rest) = queries.split_first().ok_or(SearchError::NoQueries)?;

    if rest.iter().any(|q| q.target_entity != first.target_entity) {
        return Err(SearchError::MixedEntityTypes);
    }

    let mut combined = first.clone();
    for query in rest {
        combined.filters.extend(query.filters.iter().cloned());
        if combined.collection.is_none() {
            combined.collection = query.collection.clone();
        }
        if let Some(properties) = &query.properties {
            combined
                .properties
                .get_or_insert_with(Default::default)
                .extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    Ok(combined)
}
