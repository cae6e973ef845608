use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::*;

const GRAPHQL_PATH: &str = "/admin/api/2025-07/graphql";
const FEED_PATH: &str = "/feed.csv";
const SAMPLE_FEED: &str = "sku,stock,restock\nA1,0,2025-09-01\nB2,5,\nC3,0,2025-10-15\n";

fn clients(server: &MockServer) -> (AdminClient, FeedClient, String) {
    let admin = AdminClient::with_endpoint(
        &format!("{}{GRAPHQL_PATH}", server.uri()),
        "test-token",
        5,
        "restock-test/0.1",
    )
    .expect("admin client");
    let feed = FeedClient::new(5, "restock-test/0.1").expect("feed client");
    (admin, feed, format!("{}{FEED_PATH}", server.uri()))
}

async fn mount_shop_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "query": "{ shop { name } }" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "shop": { "name": "Demo Store" } } })),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_feed(server: &MockServer, csv: &str, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv.to_string()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Answers a `productVariants` search with one variant per `sku:` term.
fn echo_variants(request: &Request) -> ResponseTemplate {
    let body: Value = serde_json::from_slice(&request.body).expect("request body is JSON");
    let search = body["variables"]["q"].as_str().unwrap_or_default();
    let nodes: Vec<Value> = search
        .split(" OR ")
        .filter_map(|term| term.strip_prefix("sku:"))
        .map(|sku| json!({ "id": format!("gid://shopify/ProductVariant/{sku}"), "sku": sku }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({
        "data": { "productVariants": { "nodes": nodes } }
    }))
}

async fn mount_variants(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productVariants"))
        .respond_with(echo_variants)
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_metafields_ok(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "metafieldsSet": { "metafields": [], "userErrors": [] } }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn metafield_values(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .iter()
        .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
        .filter_map(|b| b["variables"]["metafields"].as_array().cloned())
        .flatten()
        .map(|m| {
            (
                m["ownerId"].as_str().unwrap_or_default().to_string(),
                m["value"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn format_skus_lists_or_marks_none() {
    assert_eq!(format_skus(&["A1", "C3"]), "A1, C3");
    assert_eq!(format_skus(&[]), "(none)");
}

#[tokio::test]
async fn syncs_restock_dates_for_zero_stock_rows() {
    let server = MockServer::start().await;
    mount_shop_ok(&server).await;
    mount_feed(&server, SAMPLE_FEED, 1).await;
    mount_variants(&server, 1).await;
    mount_metafields_ok(&server, 1).await;

    let (admin, feed, feed_url) = clients(&server);
    let outcome = run_sync(&admin, &feed, &feed_url, false).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Synced { written: 2 });
    assert_eq!(
        metafield_values(&server).await,
        vec![
            (
                "gid://shopify/ProductVariant/A1".to_string(),
                "2025-09-01".to_string()
            ),
            (
                "gid://shopify/ProductVariant/C3".to_string(),
                "2025-10-15".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn connectivity_failure_aborts_before_loading_feed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "errors": "[API] Invalid API key or access token" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_feed(&server, SAMPLE_FEED, 0).await;

    let (admin, feed, feed_url) = clients(&server);
    let err = run_sync(&admin, &feed, &feed_url, false)
        .await
        .unwrap_err();

    let rendered = format!("{err:#}");
    assert!(
        rendered.starts_with("Admin API connectivity check failed: HTTP 401 Unauthorized"),
        "{rendered}"
    );
    assert!(rendered.contains("Invalid API key"), "{rendered}");
}

#[tokio::test]
async fn no_targets_skips_resolver_and_writer() {
    let server = MockServer::start().await;
    mount_shop_ok(&server).await;
    mount_feed(&server, "sku,stock,restock\nA1,3,2025-09-01\nB2,n/a,\n", 1).await;
    mount_variants(&server, 0).await;
    mount_metafields_ok(&server, 0).await;

    let (admin, feed, feed_url) = clients(&server);
    let outcome = run_sync(&admin, &feed, &feed_url, false).await.unwrap();

    assert_eq!(outcome, SyncOutcome::NoTargets);
}

#[tokio::test]
async fn empty_resolution_skips_writer() {
    let server = MockServer::start().await;
    mount_shop_ok(&server).await;
    mount_feed(&server, SAMPLE_FEED, 1).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productVariants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "productVariants": { "nodes": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_metafields_ok(&server, 0).await;

    let (admin, feed, feed_url) = clients(&server);
    let outcome = run_sync(&admin, &feed, &feed_url, false).await.unwrap();

    assert_eq!(outcome, SyncOutcome::NothingResolved { targets: 2 });
}

#[tokio::test]
async fn dry_run_resolves_but_does_not_write() {
    let server = MockServer::start().await;
    mount_shop_ok(&server).await;
    mount_feed(&server, SAMPLE_FEED, 1).await;
    mount_variants(&server, 1).await;
    mount_metafields_ok(&server, 0).await;

    let (admin, feed, feed_url) = clients(&server);
    let outcome = run_sync(&admin, &feed, &feed_url, true).await.unwrap();

    assert_eq!(outcome, SyncOutcome::DryRun { planned: 2 });
}

#[tokio::test]
async fn forty_five_targets_use_three_searches_and_two_writes() {
    let server = MockServer::start().await;
    let csv: String = std::iter::once("sku,stock,restock".to_string())
        .chain((0..45).map(|n| format!("S{n},0,2025-11-{:02}", n % 28 + 1)))
        .collect::<Vec<_>>()
        .join("\n");
    mount_shop_ok(&server).await;
    mount_feed(&server, &csv, 1).await;
    mount_variants(&server, 3).await;
    mount_metafields_ok(&server, 2).await;

    let (admin, feed, feed_url) = clients(&server);
    let outcome = run_sync(&admin, &feed, &feed_url, false).await.unwrap();

    assert_eq!(outcome, SyncOutcome::Synced { written: 45 });
    assert_eq!(metafield_values(&server).await.len(), 45);
}

#[tokio::test]
async fn user_errors_fail_the_run_and_stop_later_batches() {
    let server = MockServer::start().await;
    let csv: String = std::iter::once("sku,stock,restock".to_string())
        .chain((0..60).map(|n| format!("S{n},0,2025-12-01")))
        .collect::<Vec<_>>()
        .join("\n");
    mount_shop_ok(&server).await;
    mount_feed(&server, &csv, 1).await;
    mount_variants(&server, 3).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("metafieldsSet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "metafieldsSet": {
                "metafields": [],
                "userErrors": [{ "field": ["metafields", "0", "value"], "message": "Value is invalid" }]
            } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (admin, feed, feed_url) = clients(&server);
    let err = run_sync(&admin, &feed, &feed_url, false)
        .await
        .unwrap_err();

    let rendered = format!("{err:#}");
    assert!(rendered.starts_with("metafieldsSet failed"), "{rendered}");
    assert!(rendered.contains("metafields.0.value: Value is invalid"), "{rendered}");
}

#[tokio::test]
async fn feed_http_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_shop_ok(&server).await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_variants(&server, 0).await;

    let (admin, feed, feed_url) = clients(&server);
    let err = run_sync(&admin, &feed, &feed_url, false)
        .await
        .unwrap_err();

    assert!(
        format!("{err:#}").contains("failed to load restock feed"),
        "{err:#}"
    );
}
