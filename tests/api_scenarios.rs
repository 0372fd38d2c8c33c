//! End-to-end HTTP scenarios against the in-memory backend.

#![allow(clippy::panic, clippy::indexing_slicing)]

mod common;

use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{TestServer, product_body, spawn_app};

async fn send(request: reqwest::RequestBuilder) -> (StatusCode, Value) {
    let Ok(response) = request.send().await else {
        panic!("request failed");
    };
    let status = response.status();
    let Ok(body) = response.json::<Value>().await else {
        panic!("response body is not JSON");
    };
    (status, body)
}

async fn create(server: &TestServer, body: Value) -> Value {
    let (status, product) = send(server.client.post(server.url("/api/v1/products")).json(&body)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {product}");
    product
}

async fn history(server: &TestServer, id: &str) -> Vec<Value> {
    let (status, body) =
        send(server.client.get(server.url(&format!("/api/v1/products/{id}/history")))).await;
    assert_eq!(status, StatusCode::OK);
    let Value::Array(entries) = body else {
        panic!("history is not an array");
    };
    entries
}

#[tokio::test]
async fn health_reports_backend() {
    let server = spawn_app().await;
    let (status, body) = send(server.client.get(server.url("/health"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let server = spawn_app().await;
    let Ok(response) = server
        .client
        .get(server.url("/health"))
        .header(reqwest::header::ORIGIN, "http://dashboard.local")
        .send()
        .await
    else {
        panic!("request failed");
    };
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn status_registry_is_ordered() {
    let server = spawn_app().await;
    let (status, body) = send(server.client.get(server.url("/api/v1/statuses"))).await;
    assert_eq!(status, StatusCode::OK);
    let Value::Array(statuses) = body else {
        panic!("statuses is not an array");
    };
    let names: Vec<&str> = statuses.iter().filter_map(|s| s["status"].as_str()).collect();
    assert_eq!(
        names,
        ["AVAILABLE", "IN_EVENT", "DEFECTIVE", "IN_REPAIR", "MISSING", "RETIRED"]
    );
    assert_eq!(statuses[1]["label"], "In Event");
}

#[tokio::test]
async fn checkout_lifecycle() {
    let server = spawn_app().await;
    let product = create(&server, product_body("Wireless Mic", "Audio", "Stage Left")).await;
    assert_eq!(product["status"], "AVAILABLE");
    assert_eq!(product["createdAt"], product["updatedAt"]);
    let id = product["id"].as_str().unwrap_or_default().to_string();
    let item_url = server.url(&format!("/api/v1/products/{id}"));

    // Checkout with a blank holder is rejected without side effects.
    let (status, body) = send(
        server
            .client
            .patch(&item_url)
            .json(&json!({ "status": "IN_EVENT", "pickedBy": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
    let (_, unchanged) = send(server.client.get(&item_url)).await;
    assert_eq!(unchanged["status"], "AVAILABLE");
    assert!(history(&server, &id).await.is_empty());

    // Checkout to Alice.
    let (status, body) = send(
        server
            .client
            .patch(&item_url)
            .json(&json!({ "status": "IN_EVENT", "pickedBy": "Alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pickedBy"], "Alice");
    let entries = history(&server, &id).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["previousStatus"], "AVAILABLE");
    assert_eq!(entries[0]["newStatus"], "IN_EVENT");
    assert_eq!(entries[0]["pickedBy"], "Alice");
    assert_eq!(entries[0]["action"], "STATUS_CHANGE");
    assert_eq!(entries[0]["updatedBy"], "current-user");
    assert_eq!(entries[0]["productName"], "Wireless Mic");

    // Same status with the holder omitted keeps Alice and logs nothing.
    let (status, body) = send(
        server
            .client
            .patch(&item_url)
            .json(&json!({ "status": "IN_EVENT" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pickedBy"], "Alice");
    assert_eq!(history(&server, &id).await.len(), 1);

    // Return clears the holder.
    let (_, body) = send(
        server
            .client
            .patch(&item_url)
            .json(&json!({ "status": "AVAILABLE" })),
    )
    .await;
    assert!(body["pickedBy"].is_null());
    let entries = history(&server, &id).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["newStatus"], "AVAILABLE");

    // Delete cascades to history.
    let (status, body) = send(server.client.delete(&item_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));
    assert!(history(&server, &id).await.is_empty());
    let (status, body) = send(server.client.get(&item_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn create_validation_errors() {
    let server = spawn_app().await;
    let url = server.url("/api/v1/products");

    let mut missing_holder = product_body("Mic", "Audio", "Hall");
    missing_holder["status"] = json!("IN_EVENT");
    let (status, body) = send(server.client.post(&url).json(&missing_holder)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let mut bad_status = product_body("Mic", "Audio", "Hall");
    bad_status["status"] = json!("LOANED");
    let (_, body) = send(server.client.post(&url).json(&bad_status)).await;
    assert_eq!(body["error"]["code"], 1002);

    let mut bad_value = product_body("Mic", "Audio", "Hall");
    bad_value["value"] = json!("a lot");
    let (status, body) = send(server.client.post(&url).json(&bad_value)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = send(
        server
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{\"name\": "),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1003);

    let (_, body) = send(server.client.post(&url).json(&product_body("  ", "Audio", "Hall"))).await;
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = send(server.client.get(&url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let server = spawn_app().await;
    let url = server.url(&format!("/api/v1/products/{}", uuid::Uuid::new_v4()));

    let (status, _) = send(server.client.patch(&url).json(&json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(server.client.delete(&url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(server.client.get(server.url("/api/v1/products/not-a-uuid"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn explicit_checkout_log() {
    let server = spawn_app().await;
    let product = create(&server, product_body("Projector", "Video", "Store")).await;
    let id = product["id"].clone();
    let url = server.url("/api/v1/checkout/logs");

    let (status, body) = send(
        server
            .client
            .post(&url)
            .json(&json!({ "productId": id, "status": "IN_EVENT", "pickedBy": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);

    let (status, body) = send(server.client.post(&url).json(&json!({
        "productId": id,
        "status": "IN_EVENT",
        "pickedBy": "Bob",
        "previousStatus": "AVAILABLE",
    })))
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["action"], "CHECKOUT");
    assert_eq!(body["newStatus"], "IN_EVENT");

    let (status, _) = send(server.client.post(&url).json(&json!({
        "productId": uuid::Uuid::new_v4(),
        "status": "AVAILABLE",
    })))
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let entries = history(&server, id.as_str().unwrap_or_default()).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["productName"], "Projector");
}

#[tokio::test]
async fn list_filters_and_statistics() {
    let server = spawn_app().await;
    let mut stand = product_body("Mic Stand", "Audio", "Stage Left");
    stand["value"] = json!(40.0);
    create(&server, stand).await;
    let mut mixer = product_body("Mixer", "Audio", "Booth");
    mixer["value"] = json!(900.0);
    mixer["serialNumber"] = json!("MX-0042");
    create(&server, mixer).await;
    let mut beamer = product_body("Beamer", "Video", "booth");
    beamer["status"] = json!("DEFECTIVE");
    create(&server, beamer).await;

    let (_, body) = send(server.client.get(server.url("/api/v1/products"))).await;
    let names: Vec<&str> = body
        .as_array()
        .map(|list| list.iter().filter_map(|p| p["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, ["Beamer", "Mixer", "Mic Stand"]);

    let (_, body) = send(server.client.get(server.url("/api/v1/products?location=BOOTH"))).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    let (_, body) = send(server.client.get(server.url("/api/v1/products?search=mx-00"))).await;
    assert_eq!(body[0]["name"], "Mixer");
    let (_, body) = send(server.client.get(server.url("/api/v1/products?status=DEFECTIVE"))).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    let (status, body) = send(server.client.get(server.url("/api/v1/products?status=BROKEN"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1002);

    let (status, summary) = send(server.client.get(server.url("/api/v1/stats/summary"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["totalValue"], 940.0);
    assert_eq!(summary["mostCommonStatus"], "AVAILABLE");
    assert_eq!(summary["statusDistribution"].as_array().map(Vec::len), Some(6));
    assert_eq!(summary["topCategories"][0], json!({ "key": "Audio", "count": 2 }));
    assert_eq!(summary["distinctLocations"], 3);
    assert!(summary.get("incompleteRecords").is_none());

    let (_, body) = send(server.client.get(server.url("/api/v1/stats/groups?field=category&limit=1"))).await;
    assert_eq!(body["field"], "category");
    assert_eq!(body["groups"], json!([{ "key": "Audio", "count": 2 }]));
    let (status, _) = send(server.client.get(server.url("/api/v1/stats/groups?field=color"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(server.client.get(server.url("/api/v1/stats/recent?limit=2"))).await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}
