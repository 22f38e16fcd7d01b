//! Integration tests for the REST API.
//! Binds the router on a random local port and drives it with real HTTP
//! requests, covering the success and failure payload of every operation.

use regiond::{config::DaemonConfig, rest, AppContext};
use serde_json::{json, Value};
use std::sync::Arc;

/// Start a server on a free port; returns the /api/v1 base URL.
async fn spawn_server() -> String {
    let ctx = Arc::new(AppContext::new(DaemonConfig::default()));
    let router = rest::build_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

async fn post(base: &str, path: &str, body: Value) -> (u16, Value) {
    let resp = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

async fn get(base: &str, path: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn allocate_then_duplicate_is_conflict() {
    let base = spawn_server().await;

    let (status, body) = post(&base, "/general/allocate", json!({"key": "a", "size": 3})).await;
    assert_eq!(status, 200);
    assert_eq!(body["key"], "a");
    assert_eq!(body["size"], 3);

    let (status, body) = post(&base, "/general/allocate", json!({"key": "a", "size": 9})).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "already_exists");

    // The original region is unchanged by the rejected allocation.
    let (status, body) = get(&base, "/general/content/a").await;
    assert_eq!(status, 200);
    assert_eq!(body["content"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn missing_required_field_is_distinct_from_domain_errors() {
    let base = spawn_server().await;

    let (status, body) = post(&base, "/general/allocate", json!({"key": "a"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "missing_parameter");
    assert!(body["message"].as_str().unwrap().contains("size"));

    let (status, body) = post(&base, "/stack/push", json!({"value": 1})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "missing_parameter");
    assert!(body["message"].as_str().unwrap().contains("key"));
}

#[tokio::test]
async fn operations_on_unknown_keys_are_404() {
    let base = spawn_server().await;

    let (status, body) = post(&base, "/general/release", json!({"key": "ghost"})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");

    let (status, _) = post(&base, "/heap/resize", json!({"key": "ghost", "new_size": 4})).await;
    assert_eq!(status, 404);

    let (status, _) = get(&base, "/buffer/content/ghost").await;
    assert_eq!(status, 404);

    let (status, _) = post(&base, "/stack/pop", json!({"key": "ghost"})).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn check_bounds_reports_verdicts_not_errors() {
    let base = spawn_server().await;
    post(&base, "/general/allocate", json!({"key": "g", "size": 5})).await;

    let (status, body) = post(&base, "/general/check_bounds", json!({"key": "g", "index": 4})).await;
    assert_eq!(status, 200);
    assert_eq!(body["in_bounds"], true);

    // Out of range is still a 200 with a verdict.
    let (status, body) = post(&base, "/general/check_bounds", json!({"key": "g", "index": 5})).await;
    assert_eq!(status, 200);
    assert_eq!(body["in_bounds"], false);
    assert_eq!(body["size"], 5);

    // Negative indices are always out of bounds.
    let (status, body) =
        post(&base, "/general/check_bounds", json!({"key": "g", "index": -1})).await;
    assert_eq!(status, 200);
    assert_eq!(body["in_bounds"], false);
}

#[tokio::test]
async fn resize_preserves_values_and_reports_old_and_new() {
    let base = spawn_server().await;
    post(&base, "/heap/allocate", json!({"key": "h", "size": 5})).await;
    post(&base, "/heap/write", json!({"key": "h", "index": 2, "value": "x"})).await;

    let (status, body) = post(&base, "/heap/resize", json!({"key": "h", "new_size": 8})).await;
    assert_eq!(status, 200);
    assert_eq!(body["old_size"], 5);
    assert_eq!(body["new_size"], 8);

    let (_, body) = get(&base, "/heap/content/h").await;
    let content = body["content"].as_array().unwrap();
    assert_eq!(content.len(), 8);
    assert_eq!(content[2], json!("x"));
    assert_eq!(content[7], Value::Null);
}

#[tokio::test]
async fn write_out_of_bounds_is_rejected() {
    let base = spawn_server().await;
    post(&base, "/general/allocate", json!({"key": "g", "size": 2})).await;

    let (status, body) =
        post(&base, "/general/write", json!({"key": "g", "index": 9, "value": 1})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "out_of_bounds");
}

#[tokio::test]
async fn buffer_is_zero_filled_and_has_no_resize() {
    let base = spawn_server().await;

    let (status, _) = post(&base, "/buffer/create", json!({"key": "b", "size": 4})).await;
    assert_eq!(status, 200);

    let (status, body) = get(&base, "/buffer/content/b").await;
    assert_eq!(status, 200);
    assert_eq!(body["content"], json!([0, 0, 0, 0]));

    // No resize endpoint exists for buffers by design.
    let (status, _) = post(&base, "/buffer/resize", json!({"key": "b", "new_size": 8})).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn stack_lifo_overflow_and_underflow_over_http() {
    let base = spawn_server().await;
    post(&base, "/stack/create", json!({"key": "s", "capacity": 3})).await;

    for v in 1..=3 {
        let (status, _) = post(&base, "/stack/push", json!({"key": "s", "value": v})).await;
        assert_eq!(status, 200);
    }

    let (status, body) = post(&base, "/stack/push", json!({"key": "s", "value": 4})).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "overflow");

    // Strict reverse order, unaffected by the failed push.
    for expected in [3, 2, 1] {
        let (status, body) = post(&base, "/stack/pop", json!({"key": "s"})).await;
        assert_eq!(status, 200);
        assert_eq!(body["value"], expected);
    }

    let (status, body) = post(&base, "/stack/pop", json!({"key": "s"})).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "underflow");
}

#[tokio::test]
async fn same_key_coexists_across_namespaces() {
    let base = spawn_server().await;

    post(&base, "/general/allocate", json!({"key": "a", "size": 3})).await;
    post(&base, "/buffer/create", json!({"key": "a", "size": 3})).await;
    post(&base, "/stack/create", json!({"key": "a", "capacity": 3})).await;
    post(&base, "/heap/allocate", json!({"key": "a", "size": 3})).await;

    let (status, _) = post(&base, "/buffer/release", json!({"key": "a"})).await;
    assert_eq!(status, 200);

    // The other three namespaces still hold "a".
    let (status, _) = get(&base, "/general/content/a").await;
    assert_eq!(status, 200);
    let (status, _) = post(&base, "/stack/push", json!({"key": "a", "value": 1})).await;
    assert_eq!(status, 200);
    let (status, _) = get(&base, "/heap/content/a").await;
    assert_eq!(status, 200);
    let (status, _) = get(&base, "/buffer/content/a").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn usage_summary_reflects_live_state() {
    let base = spawn_server().await;

    post(&base, "/general/allocate", json!({"key": "g", "size": 4})).await;
    post(&base, "/general/resize", json!({"key": "g", "new_size": 6})).await;
    post(&base, "/buffer/create", json!({"key": "b", "size": 16})).await;
    post(&base, "/stack/create", json!({"key": "s", "capacity": 5})).await;
    post(&base, "/stack/push", json!({"key": "s", "value": 1})).await;
    post(&base, "/stack/push", json!({"key": "s", "value": 2})).await;
    post(&base, "/stack/pop", json!({"key": "s"})).await;

    let (status, body) = get(&base, "/usage").await;
    assert_eq!(status, 200);
    assert_eq!(body["general"]["g"], 6);
    assert_eq!(body["buffer"]["b"], 16);
    assert_eq!(body["stack"]["s"], 1);
    assert_eq!(body["heap"], json!({}));

    // No stale entries after release.
    post(&base, "/general/release", json!({"key": "g"})).await;
    let (_, body) = get(&base, "/usage").await;
    assert_eq!(body["general"], json!({}));
}

#[tokio::test]
async fn reclaim_hook_is_idempotent() {
    let base = spawn_server().await;
    post(&base, "/buffer/create", json!({"key": "b", "size": 2})).await;

    let (status, body) = post(&base, "/reclaim", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["runs"], 1);

    let (status, body) = post(&base, "/reclaim", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["runs"], 2);

    // Reclaim frees nothing.
    let (status, _) = get(&base, "/buffer/content/b").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn health_and_metrics_endpoints() {
    let base = spawn_server().await;

    let (status, body) = get(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    post(&base, "/general/allocate", json!({"key": "g", "size": 1})).await;

    let resp = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let text = resp.text().await.unwrap();
    assert!(text.contains("regiond_uptime_seconds"));
    assert!(text.contains("regiond_regions_created_total 1"));
    assert!(text.contains("regiond_live_regions 1"));
}

#[tokio::test]
async fn unknown_routes_return_structured_json() {
    let base = spawn_server().await;
    let (status, body) = get(&base, "/no/such/route").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
}
