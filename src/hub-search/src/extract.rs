//! Predicate extraction helpers.

use crate::error::{SearchError, SearchResult};
use crate::predicate::{MatchBucket, Predicate, Primitive};
use crate::query::{Filter, FilterOperation, Query};

/// Finds the single predicate carrying `field` across `filters`.
///
/// Some backend parameters (bbox, fields, flatten, openData, term) can only
/// be sent once as a flat request parameter. This hoists such a predicate
/// out of the filter list, failing when hoisting would change the meaning
/// of the query.
pub fn get_top_level_predicate(field: &str, filters: &[Filter]) -> SearchResult<Option<Predicate>> {
    let matching: Vec<&Filter> = filters.iter().filter(|f| f.has_field(field)).collect();

    let filter = match matching.as_slice() {
        [] => return Ok(None),
        [filter] => *filter,
        many => {
            return Err(SearchError::MultipleFilters {
                field: field.to_string(),
                count: many.len(),
            });
        }
    };

    let predicates: Vec<&Predicate> = filter
        .predicates
        .iter()
        .filter(|p| p.has_value(field))
        .collect();
    if predicates.len() > 1 {
        return Err(SearchError::MultiplePredicates {
            field: field.to_string(),
            count: predicates.len(),
        });
    }

    if filter.operation != FilterOperation::And && filter.predicates.len() > 1 {
        return Err(SearchError::OrPredicate {
            field: field.to_string(),
        });
    }

    let predicate = predicates[0];
    let primitive = predicate.get(field).is_some_and(|v| v.is_string_or_bool());
    if !primitive {
        return Err(SearchError::NotPrimitive {
            field: field.to_string(),
        });
    }

    Ok(Some(predicate.clone()))
}

/// Collects the `any` and `all` values of `field` across the query.
pub fn get_predicate_values(field: &str, query: &Query) -> Vec<Primitive> {
    get_predicate_values_in(field, query, &MatchBucket::DEFAULT)
}

/// Collects the values of `field` held in `buckets` across the query.
///
/// Values are returned in filter and predicate order and are not
/// deduplicated.
pub fn get_predicate_values_in(field: &str, query: &Query, buckets: &[MatchBucket]) -> Vec<Primitive> {
    let mut values = Vec::new();
    for value in query.predicates().filter_map(|p| p.get(field)) {
        let options = value.to_match_options();
        for bucket in buckets {
            values.extend(options.bucket(*bucket).iter().cloned());
        }
    }
    values
}
