//! Integration tests for the repository client
//!
//! Drives `BdrClient` over real HTTP against a wiremock server standing in
//! for the repository API.

use bdr_config::ApiConfig;
use bdr_mcp::{BdrClient, BdrError, SearchRequest};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEFAULT_FL: &str = "pid,primary_title,abstract,ir_collection_name,score";

async fn client_for(server: &MockServer) -> BdrClient {
    let config = ApiConfig::with_base_url(format!("{}/api", server.uri()));
    BdrClient::new(config).expect("client")
}

fn docs(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "pid": format!("bdr:{}", 1000 + i),
                "primary_title": format!("Irish song sheet {i}"),
                "abstract": ["Broadside ballad."],
                "ir_collection_name": "Hay Library",
                "score": 4.2
            })
        })
        .collect()
}

#[tokio::test]
async fn test_search_sends_encoded_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .and(query_param("q", "primary_title:\"irish music\""))
        .and(query_param("rows", "3"))
        .and(query_param("fl", format!("{DEFAULT_FL},genre")))
        .and(query_param("sort", "score desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 3, "docs": docs(3)}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SearchRequest::new("primary_title:\"irish music\"")
        .rows(3)
        .fields("genre, pid")
        .sort("score desc");

    let result = client.search(&request).await.unwrap();

    assert_eq!(result.returned, 3);
    assert_eq!(result.num_found, 3);
    assert!(result.warnings.is_empty());
    assert!(result.request_url.contains("q=primary_title%3A%22irish%20music%22"));
    assert_eq!(result.docs[0].title, "Irish song sheet 0 -- [bdr:1000]");
    assert_eq!(result.docs[0].abstract_text, Some(json!(["Broadside ballad."])));
    assert_eq!(result.docs[0].score, Some(4.2));
    assert!(result.took_ms >= 0.0);
}

#[tokio::test]
async fn test_search_omits_sort_when_not_given() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .and(query_param("rows", "10"))
        .and(query_param("fl", DEFAULT_FL))
        .and(query_param_is_missing("sort"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 0, "docs": []}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.search(&SearchRequest::new("nothing")).await.unwrap();
}

#[tokio::test]
async fn test_search_truncation_warning() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 137, "docs": docs(10)}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.search(&SearchRequest::new("irish")).await.unwrap();

    assert_eq!(result.returned, 10);
    assert_eq!(result.num_found, 137);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("137"));
    assert!(result.warnings[0].contains("10"));
}

#[tokio::test]
async fn test_search_zero_results_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 0, "docs": []}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.search(&SearchRequest::new("zzzz")).await.unwrap();

    assert!(result.docs.is_empty());
    assert_eq!(result.returned, 0);
    assert!(result.warnings.iter().any(|w| w.contains("No results")));
}

#[tokio::test]
async fn test_search_bad_request_fails_without_partial_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("org.apache.solr.search.SyntaxError"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .search(&SearchRequest::new("primary_title:("))
        .await
        .unwrap_err();

    match err {
        BdrError::UpstreamHttp { status, body, .. } => {
            assert_eq!(status, 400);
            assert!(body.contains("SyntaxError"));
        }
        other => panic!("expected UpstreamHttp, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_same_input_same_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"numFound": 12, "docs": docs(5)}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SearchRequest::new("irish").rows(5);

    let mut first = client.search(&request).await.unwrap();
    let mut second = client.search(&request).await.unwrap();
    first.took_ms = 0.0;
    second.took_ms = 0.0;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_item_summary() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/bdr:80246/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "primary_title": "Brown University campus map",
            "abstract": "",
            "description": "Lithograph.",
            "relations": {
                "isMemberOfCollection": [
                    {"name": "Brown University Archives", "pid": "bdr:1"},
                    {"name": "Maps", "pid": "bdr:2"}
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let item = client.get_item("bdr:80246").await.unwrap();

    assert_eq!(item.title, "Brown University campus map");
    assert_eq!(item.description, "Lithograph.");
    assert_eq!(
        item.render_text(),
        "Title: Brown University campus map\nCollections: Brown University Archives, Maps\nDescription: Lithograph."
    );
}

#[tokio::test]
async fn test_get_item_without_collections() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/bdr:7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"relations": {}})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let item = client.get_item("bdr:7").await.unwrap();

    assert_eq!(item.title, "(no title)");
    assert_eq!(item.collections_display(), "none");
}

#[tokio::test]
async fn test_get_item_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/bdr:missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_item("bdr:missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_item_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/bdr:8/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"primary_title\": "))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_item("bdr:8").await.unwrap_err();

    assert!(matches!(err, BdrError::MalformedResponse { .. }));
}
