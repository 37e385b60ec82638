//! Integration tests for the HTTP clients and `SequentialAggregator`.
//!
//! Each test stands up a `wiremock` server that plays both the full-text API
//! (`/2.1/full-text/search`) and the geocoder (`/geocode/{term}.json`).

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reqwest::Url;
use sdc_core::{AppConfig, Environment, QueryContext, SuggestionKind};
use sdc_search::{
    FailurePolicy, FullTextClient, GeocodeClient, GeocodeQuery, SearchError, SequentialAggregator,
};

const FULL_TEXT_PATH: &str = "/2.1/full-text/search";

fn aggregator(server: &MockServer) -> SequentialAggregator<FullTextClient, GeocodeClient> {
    let full_text = FullTextClient::with_base_url(&server.uri(), 5, "sdc-test/0.1")
        .expect("failed to build full-text client");
    let query = GeocodeQuery::new(&format!("{}/geocode", server.uri()), "pk.test", "us,pr")
        .expect("failed to build geocode query");
    let geocode =
        GeocodeClient::new(query, 5, "sdc-test/0.1").expect("failed to build geocode client");
    SequentialAggregator::new(full_text, geocode)
}

fn ctx(term: &str) -> QueryContext {
    QueryContext::new(term, 1)
}

fn profile(name: &str) -> serde_json::Value {
    json!({
        "type": "profile",
        "full_name": name,
        "sumlevel_name": "place",
        "url": format!("/profiles/{name}/")
    })
}

async fn mount_full_text(server: &MockServer, term: &str, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(FULL_TEXT_PATH))
        .and(query_param("q", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_geocode(server: &MockServer, term: &str, features: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/geocode/{term}.json")))
        .and(query_param("access_token", "pk.test"))
        .and(query_param("country", "us,pr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": features })))
        .expect(1)
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// clients
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_text_client_returns_raw_results() {
    let server = MockServer::start().await;
    mount_full_text(&server, "detroit", json!([profile("Detroit, MI")])).await;

    let client = FullTextClient::with_base_url(&server.uri(), 5, "sdc-test/0.1").unwrap();
    let results = client.search("detroit").await.expect("should parse results");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["full_name"], "Detroit, MI");
}

#[tokio::test]
async fn full_text_client_reports_missing_envelope_as_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FULL_TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": [] })))
        .mount(&server)
        .await;

    let client = FullTextClient::with_base_url(&server.uri(), 5, "sdc-test/0.1").unwrap();
    let err = client.search("detroit").await.unwrap_err();
    assert!(err.is_malformed(), "expected Malformed, got: {err:?}");
}

#[tokio::test]
async fn full_text_client_reports_non_json_body_as_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FULL_TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = FullTextClient::with_base_url(&server.uri(), 5, "sdc-test/0.1").unwrap();
    let err = client.search("detroit").await.unwrap_err();
    assert!(err.is_malformed(), "expected Malformed, got: {err:?}");
}

#[tokio::test]
async fn geocode_client_encodes_term_into_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/123%20Main%20St.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let query = GeocodeQuery::new(&format!("{}/geocode", server.uri()), "pk.test", "us,pr").unwrap();
    let client = GeocodeClient::new(query, 5, "sdc-test/0.1").unwrap();
    let features = client.lookup("123 Main St").await.expect("should parse features");
    assert!(features.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.path(), "/geocode/123%20Main%20St.json");
}

// ---------------------------------------------------------------------------
// aggregation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn aggregate_orders_fallback_full_text_then_geocode() {
    let server = MockServer::start().await;
    mount_full_text(
        &server,
        "detroit",
        json!([
            profile("Detroit, MI"),
            {"type": "table", "table_name": "Sex by Age", "topics": ["age", "gender"], "url": "/tables/B01001/"},
            {"type": "topic", "topic_name": "Geography", "url": "/topics/geography/"}
        ]),
    )
    .await;
    mount_geocode(
        &server,
        "detroit",
        json!([{"place_name": "Detroit, Michigan, United States", "center": [-83.05, 42.33]}]),
    )
    .await;

    let list = aggregator(&server)
        .aggregate(&ctx("detroit"))
        .await
        .expect("cycle should succeed");

    let kinds: Vec<SuggestionKind> = list.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        [
            SuggestionKind::AllResults,
            SuggestionKind::Profile,
            SuggestionKind::Table,
            SuggestionKind::Topic,
            SuggestionKind::Place,
        ]
    );
    let first = list.first().unwrap();
    assert_eq!(first.label(), "Don't see what you're looking for?");
    assert_eq!(first.target_url(), "/search/?q=detroit");

    let place = &list.geocode()[0];
    assert!(
        place.target_url().starts_with("/locate/?lat=42.33&lng=-83.05&address="),
        "{}",
        place.target_url()
    );
}

#[tokio::test]
async fn aggregate_requests_full_text_before_geocode() {
    let server = MockServer::start().await;
    mount_full_text(&server, "wayne", json!([])).await;
    mount_geocode(&server, "wayne", json!([])).await;

    aggregator(&server).aggregate(&ctx("wayne")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, [FULL_TEXT_PATH, "/geocode/wayne.json"]);
}

#[tokio::test]
async fn aggregate_caps_full_text_at_twenty_in_server_order() {
    let server = MockServer::start().await;
    let results: Vec<_> = (0..35).map(|i| profile(&format!("place {i}"))).collect();
    mount_full_text(&server, "place", json!(results)).await;
    let features: Vec<_> = (0..30)
        .map(|i| json!({"place_name": format!("addr {i}"), "center": [-83.0, 42.0]}))
        .collect();
    mount_geocode(&server, "place", json!(features)).await;

    let list = aggregator(&server).aggregate(&ctx("place")).await.unwrap();

    assert_eq!(list.full_text().len(), 20);
    let labels: Vec<&str> = list.full_text().iter().map(|s| s.label()).collect();
    let expected: Vec<String> = (0..20).map(|i| format!("place {i}")).collect();
    assert_eq!(labels, expected);
    assert_eq!(list.geocode().len(), 30);
}

#[tokio::test]
async fn aggregate_excludes_unrecognized_categories() {
    let server = MockServer::start().await;
    mount_full_text(
        &server,
        "mixed",
        json!([
            profile("Detroit, MI"),
            {"type": "unknown", "name": "mystery"},
            {"type": "table", "table_name": "Poverty", "topics": ["poverty"], "url": "/tables/B17001/"}
        ]),
    )
    .await;
    mount_geocode(&server, "mixed", json!([])).await;

    let list = aggregator(&server).aggregate(&ctx("mixed")).await.unwrap();
    assert_eq!(list.full_text().len(), 2);
}

#[tokio::test]
async fn full_text_failure_aborts_cycle_without_geocode_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FULL_TEXT_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geocode/detroit.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "features": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let result = aggregator(&server).aggregate(&ctx("detroit")).await;
    assert!(
        matches!(result, Err(SearchError::Transport(_))),
        "expected Transport error, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_full_text_envelope_aborts_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FULL_TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": "nope" })))
        .mount(&server)
        .await;

    let result = aggregator(&server).aggregate(&ctx("detroit")).await;
    assert!(matches!(result, Err(ref e) if e.is_malformed()), "{result:?}");
}

#[tokio::test]
async fn geocode_transport_failure_aborts_cycle_when_fail_closed() {
    let server = MockServer::start().await;
    mount_full_text(&server, "detroit", json!([profile("Detroit, MI")])).await;
    Mock::given(method("GET"))
        .and(path("/geocode/detroit.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = aggregator(&server).aggregate(&ctx("detroit")).await;
    assert!(matches!(result, Err(SearchError::Transport(_))), "{result:?}");
}

#[tokio::test]
async fn geocode_transport_failure_is_tolerated_when_partial() {
    let server = MockServer::start().await;
    mount_full_text(&server, "detroit", json!([profile("Detroit, MI")])).await;
    Mock::given(method("GET"))
        .and(path("/geocode/detroit.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let list = aggregator(&server)
        .with_failure_policy(FailurePolicy::Partial)
        .aggregate(&ctx("detroit"))
        .await
        .expect("partial policy should not fail");
    assert_eq!(list.len(), 2);
    assert!(list.geocode().is_empty());
}

#[tokio::test]
async fn malformed_geocode_envelope_yields_zero_geocode_results() {
    let server = MockServer::start().await;
    mount_full_text(&server, "detroit", json!([profile("Detroit, MI")])).await;
    Mock::given(method("GET"))
        .and(path("/geocode/detroit.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "type": "FeatureCollection" })))
        .mount(&server)
        .await;

    let list = aggregator(&server).aggregate(&ctx("detroit")).await.unwrap();
    assert_eq!(list.full_text().len(), 1);
    assert!(list.geocode().is_empty());
}

#[tokio::test]
async fn configured_aggregator_applies_cap_and_partial_policy() {
    let server = MockServer::start().await;
    let results: Vec<_> = (0..10).map(|i| profile(&format!("Place {i}"))).collect();
    mount_full_text(&server, "place", json!(results)).await;
    Mock::given(method("GET"))
        .and(path("/geocode/place.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        api_base_url: Url::parse(&server.uri()).unwrap(),
        geocode_base_url: Url::parse(&format!("{}/geocode", server.uri())).unwrap(),
        geocode_token: "pk.test".to_string(),
        geocode_country: "us,pr".to_string(),
        min_query_len: 3,
        fulltext_result_cap: 5,
        partial_results: true,
        http_timeout_secs: 5,
        user_agent: "sdc-test/0.1".to_string(),
        site_base_url: Url::parse("http://localhost:8000").unwrap(),
    };

    let list = SequentialAggregator::from_config(&config)
        .unwrap()
        .aggregate(&ctx("place"))
        .await
        .expect("partial policy should not fail");
    let labels: Vec<_> = list.full_text().iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["Place 0", "Place 1", "Place 2", "Place 3", "Place 4"]);
    assert!(list.geocode().is_empty());
}
