//! Category endpoints: list, create, upsert, delete and full replace.

mod common;

use common::spawn_server;
use reqwest::StatusCode;
use serde_json::{json, Value};
use showroom_core::DocumentStore;

fn casement() -> Value {
    json!({
        "id": "casement",
        "type": "windows",
        "title": "Casement Windows",
        "description": "Side-hung and top-hung",
        "products": [
            {
                "id": "cw-1",
                "title": "Heritage",
                "longDescription": "Slim sightlines for period homes",
                "specs": { "profile": "70mm", "chambers": 6, "secured": true }
            }
        ]
    })
}

fn strip_timestamps(mut value: Value) -> Value {
    let object = value.as_object_mut().unwrap();
    object.remove("createdAt");
    object.remove("updatedAt");
    value
}

async fn list(server: &common::TestServer) -> Vec<Value> {
    let response = server
        .client
        .get(server.url("/api/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.unwrap()
}

#[tokio::test]
async fn create_then_list_contains_the_document_once() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let listed = list(&server).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(strip_timestamps(listed[0].clone()), casement());
}

#[tokio::test]
async fn spec_keys_keep_their_order() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let listed = list(&server).await;
    let keys: Vec<&String> = listed[0]["products"][0]["specs"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(keys, ["profile", "chambers", "secured"]);
}

#[tokio::test]
async fn product_without_specs_lists_back_unchanged() {
    let server = spawn_server().await;
    let payload = json!({
        "id": "french",
        "type": "doors",
        "title": "French Doors",
        "products": [{ "title": "Classic" }]
    });

    let response = server
        .client
        .post(server.url("/api/category"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let listed = list(&server).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(strip_timestamps(listed[0].clone()), payload);
}

#[tokio::test]
async fn create_rejects_unknown_type() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/api/category"))
        .json(&json!({ "id": "roof", "type": "roofs", "title": "Roof lanterns" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["type"], "validationError");
    assert!(body["error"]["message"].as_str().unwrap().contains("roofs"));

    assert!(list(&server).await.is_empty());
}

#[tokio::test]
async fn create_rejects_missing_title() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/api/category"))
        .json(&json!({ "id": "bifold", "type": "doors" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["message"], "`title` is required");
}

#[tokio::test]
async fn create_with_taken_id_conflicts() {
    let server = spawn_server().await;
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let response = server
            .client
            .post(server.url("/api/category"))
            .json(&casement())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), expected);
    }
    assert_eq!(list(&server).await.len(), 1);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/api/category"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["type"], "badRequest");
}

#[tokio::test]
async fn upsert_creates_missing_category_under_path_id() {
    let server = spawn_server().await;

    let response = server
        .client
        .put(server.url("/api/category/french"))
        .json(&json!({ "id": "other", "type": "doors", "title": "French Doors" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], "french");
    assert_eq!(body["products"], json!([]));

    let listed = list(&server).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], "french");
}

#[tokio::test]
async fn upsert_merges_and_is_idempotent() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let patch = json!({ "title": "Casement & Tilt", "image": "/img/casement.webp" });
    let mut results = Vec::new();
    for _ in 0..2 {
        let response = server
            .client
            .put(server.url("/api/category/casement"))
            .json(&patch)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        results.push(strip_timestamps(response.json().await.unwrap()));
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0]["title"], "Casement & Tilt");
    assert_eq!(results[0]["description"], "Side-hung and top-hung");
    assert_eq!(results[0]["products"][0]["id"], "cw-1");
    assert_eq!(list(&server).await.len(), 1);
}

#[tokio::test]
async fn upsert_of_new_key_without_required_fields_fails() {
    let server = spawn_server().await;

    let response = server
        .client
        .put(server.url("/api/category/ghost"))
        .json(&json!({ "description": "no title, no type" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list(&server).await.is_empty());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .delete(server.url("/api/category/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "success": true }));
    assert_eq!(list(&server).await.len(), 1);

    for _ in 0..2 {
        let response = server
            .client
            .delete(server.url("/api/category/casement"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert!(list(&server).await.is_empty());
}

#[tokio::test]
async fn sync_replaces_the_whole_collection() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let replacement = vec![
        json!({ "id": "sash", "type": "windows", "title": "Sash", "products": [] }),
        json!({ "id": "composite", "type": "doors", "title": "Composite", "products": [] }),
    ];
    let response = server
        .client
        .post(server.url("/api/products/sync"))
        .json(&json!({ "categories": replacement }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "success": true, "message": "Synced 2 categories" })
    );

    let listed: Vec<Value> = list(&server).await.into_iter().map(strip_timestamps).collect();
    assert_eq!(listed, replacement);
}

#[tokio::test]
async fn sync_with_empty_list_clears_everything() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/api/products/sync"))
        .json(&json!({ "categories": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(list(&server).await.is_empty());
}

#[tokio::test]
async fn invalid_sync_leaves_existing_categories_alone() {
    let server = spawn_server().await;
    server
        .client
        .post(server.url("/api/category"))
        .json(&casement())
        .send()
        .await
        .unwrap();

    let response = server
        .client
        .post(server.url("/api/products/sync"))
        .json(&json!({
            "categories": [
                { "id": "ok", "type": "doors", "title": "Fine" },
                { "id": "bad", "type": "gates", "title": "Not a product line" }
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("categories[1]:"));

    let remaining = server.store.list_categories().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].content.id, "casement");
}

#[tokio::test]
async fn sync_without_categories_field_is_rejected() {
    let server = spawn_server().await;

    let response = server
        .client
        .post(server.url("/api/products/sync"))
        .json(&json!({ "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
