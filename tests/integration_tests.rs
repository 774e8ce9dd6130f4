//! Integration tests using mock HTTP server
//!
//! Tests the full flow: settings → client → rate limiter → normalization → pagination

use futures::TryStreamExt;
use reddit_things::config::ClientSettings;
use reddit_things::thing::Normalized;
use reddit_things::{Error, HttpClient, ListingPager, RequestOptions, SemanticKind};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer, min_interval_ms: u64) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        user_agent: "reddit-things-integration/0.1 (by /u/tester)".to_string(),
        min_interval_ms,
        ..Default::default()
    }
}

fn pager_for(server: &MockServer, min_interval_ms: u64) -> ListingPager {
    let settings = settings_for(server, min_interval_ms);
    let page_limit = settings.page_limit;
    let client = HttpClient::with_config(settings.into_client_config().unwrap()).unwrap();
    ListingPager::new(client).with_page_limit(page_limit)
}

fn page(ids: &[&str], after: Option<&str>) -> Value {
    let children: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "kind": "t3",
                "data": {"id": id, "name": format!("t3_{id}"), "created_utc": 1_709_300_700.0}
            })
        })
        .collect();
    json!({"kind": "Listing", "data": {"after": after, "before": null, "children": children}})
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_paginate_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .and(query_param_is_missing("after"))
        .and(query_param("t", "week"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a", "b"], Some("t3_b"))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/r/rust/top.json"))
        .and(query_param("after", "t3_b"))
        .and(query_param("t", "week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["c"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let pager = pager_for(&server, 0);
    let items: Vec<Normalized> = pager
        .paginate("r/rust/top", RequestOptions::new().query("t", "week"))
        .try_collect()
        .await
        .unwrap();

    let names: Vec<&str> = items
        .iter()
        .filter_map(|item| item.as_item()?.name())
        .collect();
    assert_eq!(names, vec!["t3_a", "t3_b", "t3_c"]);

    let histogram = reddit_things::stats::hour_histogram(&items);
    assert_eq!(histogram.counts[13], 3);
}

#[tokio::test]
async fn test_concurrent_paginations_share_rate_limiter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/rust/new.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["x"], None)))
        .expect(3)
        .mount(&server)
        .await;

    let pager = pager_for(&server, 100);
    let start = Instant::now();

    let (a, b, c) = tokio::join!(
        pager.paginate("r/rust/new", RequestOptions::new()).try_collect::<Vec<_>>(),
        pager.paginate("r/rust/new", RequestOptions::new()).try_collect::<Vec<_>>(),
        pager.paginate("r/rust/new", RequestOptions::new()).try_collect::<Vec<_>>(),
    );

    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
    assert_eq!(c.unwrap().len(), 1);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_paginate_rejects_non_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/info.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"children": []}})))
        .expect(1)
        .mount(&server)
        .await;

    let pager = pager_for(&server, 0);
    let result = pager
        .paginate("api/info", RequestOptions::new())
        .try_collect::<Vec<_>>()
        .await;

    assert!(matches!(result, Err(Error::NotAListing { .. })));
}

// ============================================================================
// Normalization over HTTP
// ============================================================================

#[tokio::test]
async fn test_comment_thread_is_normalized() {
    let server = MockServer::start().await;

    // Comment pages come back as [link listing, comment listing]
    Mock::given(method("GET"))
        .and(path("/r/rust/comments/abc.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"kind": "Listing", "data": {"after": null, "children": [
                {"kind": "t3", "data": {"id": "abc", "title": "Ownership"}}
            ]}},
            {"kind": "Listing", "data": {"after": null, "children": [
                {"kind": "t1", "data": {"id": "c1", "body": "top", "replies": {
                    "kind": "Listing", "data": {"after": null, "children": [
                        {"kind": "t1", "data": {"id": "c2", "body": "reply", "replies": ""}}
                    ]}
                }}},
                {"kind": "more", "data": {"count": 12, "children": ["c3", "c4"]}}
            ]}}
        ])))
        .mount(&server)
        .await;

    let pager = pager_for(&server, 0);
    let thread = pager
        .client()
        .request_normalized("r/rust/comments/abc", &RequestOptions::new())
        .await
        .unwrap();

    let Normalized::Array(parts) = &thread else {
        panic!("Expected array, got {thread:?}");
    };
    assert_eq!(parts[0].as_listing().unwrap().items()[0].kind(), Some(SemanticKind::Link));

    let comments = parts[1].as_listing().unwrap();
    assert_eq!(comments.len(), 2);

    let top = comments.items()[0].as_item().unwrap();
    let reply = &top.get("replies").and_then(Normalized::as_listing).unwrap().items()[0];
    assert_eq!(reply.get("body").and_then(Normalized::as_str), Some("reply"));

    // "more" stubs are left as they are
    assert_eq!(comments.items()[1].kind(), None);
    assert_eq!(comments.items()[1].get("kind").and_then(Normalized::as_str), Some("more"));
}

#[tokio::test]
async fn test_fetch_by_id_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/by_id/t3_a,t3_b.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&["a", "b"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let pager = pager_for(&server, 0);
    let result = pager
        .fetch_by_id("t3_a,t3_b", &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(result.as_listing().unwrap().len(), 2);
}

#[tokio::test]
async fn test_request_failure_surfaces_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/r/banned/new.json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"reason": "banned"})))
        .expect(1)
        .mount(&server)
        .await;

    let pager = pager_for(&server, 0);
    let err = pager
        .paginate("r/banned/new", RequestOptions::new())
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.to_string().contains("r/banned/new"));
}
