//! Router tests over a file store in a temporary directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use items_core::{Item, ItemStore};
use items_file::FileStore;
use items_server::router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    _dir: TempDir,
    store: Arc<FileStore>,
    app: Router,
}

impl TestApp {
    async fn with_ids(ids: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        for id in ids {
            store
                .put(&Item::new(json!({ "id": id, "name": format!("item {}", id) })).unwrap())
                .await
                .unwrap();
        }
        let app = router(store.clone());
        Self {
            _dir: dir,
            store,
            app,
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if body.is_some() {
            req = req.header("content-type", "application/json");
        }
        let req = req
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }
}

fn ids(items: &Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect()
}

// ============================================================================
// Service Routes
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::with_ids(&[]).await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_root_lists_routes() {
    let app = TestApp::with_ids(&[]).await;
    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);

    let routes = body["routes"].as_array().unwrap();
    assert!(routes.contains(&json!({ "path": "/v1/items", "method": "GET" })));
    assert!(routes.contains(&json!({ "path": "/items/{item_id}", "method": "DELETE" })));
}

#[tokio::test]
async fn test_every_listed_route_is_served() {
    let app = TestApp::with_ids(&["a"]).await;

    for (method, path) in items_server::routes::ROUTES {
        // Earlier DELETEs must not starve later GETs.
        app.store
            .put(&Item::new(json!({ "id": "a", "name": "A" })).unwrap())
            .await
            .unwrap();

        let uri = path
            .replace("{item_id}", "a")
            .replace("{property_name}", "name");
        let body = matches!(*method, "POST" | "PUT").then_some(r#"{"id":"a","name":"A"}"#);
        let (status, _) = app.send(method, &uri, body).await;
        assert!(
            status.is_success(),
            "{} {} answered {}",
            method,
            uri,
            status
        );
    }
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_v1_pages_through_items() {
    let app = TestApp::with_ids(&["a", "b", "c", "d", "e"]).await;

    let (status, first) = app.get("/v1/items?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&first["items"]), ["a", "b"]);
    let cursor = first["next_cursor"].as_str().unwrap().to_string();

    let (_, second) = app.get(&format!("/v1/items?limit=2&cursor={}", cursor)).await;
    assert_eq!(ids(&second["items"]), ["c", "d"]);
    let cursor = second["next_cursor"].as_str().unwrap().to_string();

    let (_, third) = app.get(&format!("/v1/items?limit=2&cursor={}", cursor)).await;
    assert_eq!(ids(&third["items"]), ["e"]);
    assert!(third["next_cursor"].is_null());
}

#[tokio::test]
async fn test_v1_default_limit_is_ten() {
    let names: Vec<String> = (0..15).map(|n| format!("i{:02}", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let app = TestApp::with_ids(&refs).await;

    let (status, page) = app.get("/v1/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert!(page["next_cursor"].is_string());
}

#[tokio::test]
async fn test_v1_empty_cursor_is_first_page() {
    let app = TestApp::with_ids(&["a", "b"]).await;
    let (status, page) = app.get("/v1/items?cursor=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page["items"]), ["a", "b"]);
}

#[tokio::test]
async fn test_v1_rejects_bad_limits() {
    let app = TestApp::with_ids(&["a"]).await;

    for limit in ["0", "101", "-1", "ten", ""] {
        let (status, body) = app.get(&format!("/v1/items?limit={}", limit)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "limit={:?}", limit);
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_v1_rejects_bad_cursor() {
    let app = TestApp::with_ids(&["a"]).await;
    let (status, body) = app.get("/v1/items?cursor=not-valid-base64!!").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "detail": "Invalid cursor format" }));
}

#[tokio::test]
async fn test_legacy_listing_returns_everything() {
    let names: Vec<String> = (0..120).map(|n| format!("i{:03}", n)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let app = TestApp::with_ids(&refs).await;

    let (status, body) = app.get("/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), refs);
}

// ============================================================================
// Single Items
// ============================================================================

#[tokio::test]
async fn test_get_item_and_property() {
    let app = TestApp::with_ids(&["w1"]).await;

    let (status, body) = app.get("/items/w1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "w1", "name": "item w1" }));

    let (status, body) = app.get("/v1/items/w1/name").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "item w1" }));
}

#[tokio::test]
async fn test_missing_item_and_property() {
    let app = TestApp::with_ids(&["w1"]).await;

    let (status, body) = app.get("/items/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Item not found" }));

    let (status, body) = app.get("/items/nope/name").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Item not found" }));

    let (status, body) = app.get("/items/w1/colour").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Property 'colour' not found" }));
}

#[tokio::test]
async fn test_create_item() {
    let app = TestApp::with_ids(&[]).await;

    let (status, body) = app
        .send("POST", "/v1/items", Some(r#"{"id":"n1","name":"New"}"#))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": "n1", "name": "New" }));

    let stored = app
        .store
        .get_by_key(&items_core::ItemId::new("n1").unwrap())
        .await
        .unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let app = TestApp::with_ids(&[]).await;

    for body in [r#"{"name":"no id"}"#, r#"[1,2]"#, "{ not json", r#"{"id":""}"#] {
        let (status, rsp) = app.send("POST", "/items", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body={}", body);
        assert!(rsp["detail"].is_string());
    }
}

#[tokio::test]
async fn test_update_forces_path_id() {
    let app = TestApp::with_ids(&["w1"]).await;

    let (status, body) = app
        .send("PUT", "/items/w1", Some(r#"{"id":"other","name":"Renamed"}"#))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "w1", "name": "Renamed" }));

    let (_, fetched) = app.get("/items/w1").await;
    assert_eq!(fetched["name"], "Renamed");
    let (status, _) = app.get("/items/other").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = TestApp::with_ids(&["w1"]).await;

    let (status, body) = app.send("DELETE", "/items/w1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.send("DELETE", "/v1/items/w1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/items/w1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
