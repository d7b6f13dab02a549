//! Tests for catalog queries and containment.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hub_search::{
    EntityType, Filter, HubSearchResult, Predicate, Query, SearchBackend, SearchError,
    SearchOptions, SearchResponse, SearchResult, SortDirection, get_predicate_values,
};
use pretty_assertions::assert_eq;

use super::catalog_contains;
use crate::catalog::Catalog;
use crate::context::{HubContext, InMemoryCatalogFetcher};
use crate::error::CatalogError;
use crate::types::{ContainsOptions, HubCatalog, HubCollection};

const ITEM_ID: &str = "9001b1fa1f3c4b4f8d3f5b2a4e8e6c3d";

// Answers every query with a single hit and records what it was asked.
#[derive(Default)]
struct RecordingSearch {
    calls: Mutex<Vec<(Query, SearchOptions)>>,
}

#[async_trait]
impl SearchBackend for RecordingSearch {
    async fn search(&self, query: &Query, options: &SearchOptions) -> SearchResult<SearchResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((query.clone(), options.clone()));
        Ok(SearchResponse::from_results(vec![HubSearchResult::new(
            ITEM_ID,
        )]))
    }
}

struct FailingSearch;

#[async_trait]
impl SearchBackend for FailingSearch {
    async fn search(&self, _: &Query, _: &SearchOptions) -> SearchResult<SearchResponse> {
        Err(SearchError::backend("timeout"))
    }
}

fn site_catalog() -> HubCatalog {
    HubCatalog::new()
        .with_title("Site")
        .with_scope(
            Query::new(EntityType::Item)
                .with_predicate(Predicate::field("group", vec!["g1", "g2"])),
        )
        .with_scope(Query::new(EntityType::Event).with_predicate(Predicate::field("orgId", "o1")))
        .with_collection(HubCollection {
            sort_field: Some("modified".to_string()),
            sort_direction: Some(SortDirection::Desc),
            include: Some(vec!["server".to_string()]),
            ..HubCollection::new(
                "dataset",
                "Datasets",
                Query::new(EntityType::Item)
                    .with_predicate(Predicate::field("type", "Feature Service")),
            )
        })
}

fn context(search: Arc<dyn SearchBackend>) -> HubContext {
    let fetcher = InMemoryCatalogFetcher::new().with_catalog("00a", site_catalog());
    HubContext::new(search, Arc::new(fetcher))
}

#[test]
fn test_catalog_accessors() {
    let catalog = Catalog::from_json(site_catalog(), context(Arc::new(RecordingSearch::default())));

    assert_eq!(catalog.title(), Some("Site"));
    assert_eq!(catalog.schema_version(), 1);
    assert_eq!(catalog.available_scopes(), vec![EntityType::Item, EntityType::Event]);
    assert_eq!(catalog.collection_names(), vec!["dataset"]);
    assert!(catalog.get_collection("dataset").is_some());
    assert!(catalog.get_collection("missing").is_none());
    assert!(catalog.get_scope(EntityType::Group).is_none());
    assert_eq!(catalog.to_json(), site_catalog());
}

#[tokio::test]
async fn test_init_fetches_catalog() {
    let ctx = context(Arc::new(RecordingSearch::default()));

    let catalog = Catalog::init("00a", ctx.clone()).await.unwrap();
    assert_eq!(catalog.to_json(), site_catalog());

    let err = Catalog::init("zzz", ctx).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id == "zzz"));
}

#[tokio::test]
async fn test_search_combines_scope_with_query() {
    let search = Arc::new(RecordingSearch::default());
    let catalog = Catalog::from_json(site_catalog(), context(search.clone()));

    let query = Query::new(EntityType::Item).with_filter(Filter::or([
        Predicate::field("term", "parks"),
        Predicate::field("tags", "parks"),
    ]));
    let response = catalog.search(&query).await.unwrap();
    assert_eq!(response.results.len(), 1);

    let calls = search.calls.lock().unwrap();
    let (sent, options) = &calls[0];
    assert_eq!(sent.filters.len(), 2);
    assert_eq!(sent.filters[1], query.filters[0]);
    assert_eq!(get_predicate_values("group", sent).len(), 2);
    assert_eq!(options.num, 10);
}

#[tokio::test]
async fn test_search_without_scope_fails() {
    let catalog = Catalog::from_json(site_catalog(), context(Arc::new(RecordingSearch::default())));
    let query = Query::new(EntityType::Group).with_predicate(Predicate::field("term", "x"));

    let err = catalog.search(&query).await.unwrap_err();
    assert_eq!(err.to_string(), "Catalog has no scope for entity type 'group'");
}

#[tokio::test]
async fn test_search_collection_applies_collection_options() {
    let search = Arc::new(RecordingSearch::default());
    let catalog = Catalog::from_json(site_catalog(), context(search.clone()));
    let query = Query::new(EntityType::Item).with_predicate(Predicate::field("term", "roads"));

    catalog.search_collection("dataset", &query).await.unwrap();

    let calls = search.calls.lock().unwrap();
    let (sent, options) = &calls[0];
    assert_eq!(
        get_predicate_values("type", sent)[0].as_str(),
        Some("Feature Service")
    );
    assert_eq!(options.sort_field.as_deref(), Some("modified"));
    assert_eq!(options.sort_order, Some(SortDirection::Desc));
    assert_eq!(options.include, vec!["server"]);
}

#[tokio::test]
async fn test_search_unknown_collection_fails() {
    let catalog = Catalog::from_json(site_catalog(), context(Arc::new(RecordingSearch::default())));
    let query = Query::new(EntityType::Item).with_predicate(Predicate::field("term", "x"));

    let err = catalog.search_collection("nope", &query).await.unwrap_err();
    assert!(matches!(err, CatalogError::CollectionNotFound(key) if key == "nope"));
}

#[tokio::test]
async fn test_contains_appends_identifier_filter_and_limits_page() {
    let search = Arc::new(RecordingSearch::default());
    let ctx = context(search.clone());

    let response = catalog_contains(
        ITEM_ID,
        &site_catalog(),
        &ctx,
        &ContainsOptions::for_entity(EntityType::Item),
    )
    .await
    .unwrap();
    assert!(response.is_contained);
    assert_eq!(response.identifier, ITEM_ID);

    let calls = search.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (sent, options) = &calls[0];
    let catalog = site_catalog();
    assert_eq!(
        sent.filters.len(),
        catalog.scopes[&EntityType::Item].filters.len() + 1
    );
    assert_eq!(
        sent.filters.last().unwrap(),
        &Filter::and([Predicate::field("id", ITEM_ID)])
    );
    assert_eq!(options.num, 1);
}

#[tokio::test]
async fn test_contains_propagates_search_errors() {
    let catalog = Catalog::from_json(site_catalog(), context(Arc::new(FailingSearch)));

    let err = catalog
        .contains(ITEM_ID, &ContainsOptions::for_entity(EntityType::Item))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Search(SearchError::Backend(_))));
}
