//! Integration tests for the hub-search crate.
//!
//! Exercises the public API end to end: queries read from their JSON wire
//! form, predicate helpers, query combination and routed, paged searches.

use std::io::Write;
use std::sync::{Arc, Mutex};

use hub_search::{
    EntityType, FilterOperation, HubConfig, HubSearch, HubSearchResult, MatchBucket,
    Predicate, PredicateValue, Query, SearchApi, SearchBackend, SearchError, SearchOptions,
    SearchResponse, SearchResult, async_trait, combine_queries, get_predicate_values,
    get_predicate_values_in, get_top_level_predicate,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn wire_query() -> Query {
    serde_json::from_value(json!({
        "targetEntity": "item",
        "filters": [
            {
                "operation": "OR",
                "predicates": [
                    { "type": { "any": ["Web Map", "Web Mapping Application"] } },
                    { "tags": "parks" }
                ]
            },
            {
                "predicates": [
                    { "bbox": "-118,32,-116,34", "owner": { "not": ["esri"] } }
                ]
            }
        ]
    }))
    .unwrap()
}

// ============================================================================
// QUERY MODEL TESTS
// ============================================================================

mod query_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wire_query_shape() {
        let query = wire_query();
        assert_eq!(query.target_entity, EntityType::Item);
        assert_eq!(query.filters[0].operation, FilterOperation::Or);
        assert_eq!(query.filters[1].operation, FilterOperation::And);
        assert_eq!(query.predicates().count(), 3);
    }

    #[test]
    fn test_bbox_is_hoisted_from_wire_query() {
        let query = wire_query();
        let bbox = get_top_level_predicate("bbox", &query.filters).unwrap().unwrap();
        assert_eq!(bbox.get("bbox"), Some(&PredicateValue::from("-118,32,-116,34")));

        // Hoisting does not modify the query.
        assert_eq!(query, wire_query());
    }

    #[test]
    fn test_null_field_does_not_count_as_predicate() {
        let query: Query = serde_json::from_value(json!({
            "targetEntity": "item",
            "filters": [
                { "predicates": [{ "bbox": null, "term": "water" }] },
                { "predicates": [{ "bbox": "1,2,3,4" }] }
            ]
        }))
        .unwrap();

        let bbox = get_top_level_predicate("bbox", &query.filters).unwrap();
        assert_eq!(bbox, Some(Predicate::field("bbox", "1,2,3,4")));
        assert_eq!(get_predicate_values("bbox", &query).len(), 1);
    }

    #[test]
    fn test_values_are_collected_per_bucket() {
        let query = wire_query();

        let types: Vec<_> = get_predicate_values("type", &query)
            .into_iter()
            .filter_map(|p| p.as_str().map(str::to_string))
            .collect();
        assert_eq!(types, vec!["Web Map", "Web Mapping Application"]);

        assert!(get_predicate_values("owner", &query).is_empty());
        let excluded = get_predicate_values_in("owner", &query, &[MatchBucket::Not]);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].as_str(), Some("esri"));
    }

    #[test]
    fn test_combined_query_keeps_every_filter() {
        let scope = Query::new(EntityType::Item)
            .with_predicate(Predicate::field("group", vec!["g1"]))
            .with_collection("dataset");
        let combined = combine_queries(&[scope.clone(), wire_query()]).unwrap();

        assert_eq!(combined.filters.len(), scope.filters.len() + wire_query().filters.len());
        assert_eq!(combined.collection.as_deref(), Some("dataset"));

        let users = Query::new(EntityType::User).with_predicate(Predicate::field("term", "a"));
        let err = combine_queries(&[combined, users]).unwrap_err();
        assert_eq!(err.to_string(), "Cannot combine queries for different entity types");
    }
}

// ============================================================================
// DISPATCH TESTS
// ============================================================================

mod dispatch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Serves `total` numbered results in pages of `options.num`.
    struct PagedBackend {
        total: u32,
        starts: Mutex<Vec<u32>>,
    }

    impl PagedBackend {
        fn new(total: u32) -> Self {
            Self {
                total,
                starts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for PagedBackend {
        async fn search(&self, _query: &Query, options: &SearchOptions) -> SearchResult<SearchResponse> {
            self.starts.lock().unwrap().push(options.start);

            let end = (options.start + options.num - 1).min(self.total);
            let results = (options.start..=end)
                .map(|n| HubSearchResult::new(format!("item-{n}")))
                .collect();
            let has_next = end < self.total;
            Ok(SearchResponse {
                results,
                total: u64::from(self.total),
                has_next,
                next_start: has_next.then_some(end + 1),
                aggregations: Vec::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_pages_through_configured_backend() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api = \"arcgis-hub\"\npage_size = 4").unwrap();
        let config = HubConfig::load_from_file(file.path()).await.unwrap();
        assert_eq!(config.api, SearchApi::Hub);

        let backend = Arc::new(PagedBackend::new(10));
        let search = HubSearch::builder()
            .backend(SearchApi::Hub, EntityType::Item, backend.clone())
            .build();

        let query = wire_query();
        let options = config.search_options();
        let mut page = search.hub_search(&query, &options).await.unwrap();
        let mut ids: Vec<String> = page.results.iter().map(|r| r.id.clone()).collect();
        let mut current = options.clone();

        while let Some(next) = page.next_options(&current) {
            page = search.hub_search(&query, &next).await.unwrap();
            ids.extend(page.results.iter().map(|r| r.id.clone()));
            current = next;
        }

        assert_eq!(ids.len(), 10);
        assert_eq!(ids.last().map(String::as_str), Some("item-10"));
        assert_eq!(*backend.starts.lock().unwrap(), vec![1, 5, 9]);
        assert!(search.next(&query, &current, &page).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unrouted_api_is_not_implemented() {
        let search = HubSearch::builder()
            .backend(SearchApi::Hub, EntityType::Item, Arc::new(PagedBackend::new(1)))
            .build();

        // Default options target the portal api.
        let err = search
            .hub_search(&wire_query(), &HubConfig::default().search_options())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::NotImplemented {
                entity: EntityType::Item,
                api: SearchApi::Portal
            }
        ));
    }
}
