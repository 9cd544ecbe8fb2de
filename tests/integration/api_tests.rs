//! REST contract tests

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use crate::common::{get_auth_token, spawn_server};

#[tokio::test]
async fn test_health_check_is_public() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_login_and_bearer_gating() {
    let base_url = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", base_url))
        .json(&json!({ "login": "admin", "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client
        .get(format!("{}/engines", base_url))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NotAuthorized");

    let token = get_auth_token(&client, &base_url, "admin").await;
    let me: Value = client
        .get(format!("{}/auth/me", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(me["login"], "admin");
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn test_viewer_cannot_write() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "viewer").await;

    let response = client
        .post(format!("{}/disponibility/available", base_url))
        .bearer_auth(&token)
        .json(&json!({ "engineId": "MM1ET00805" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = client
        .get(format!("{}/engines", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_engine_crud() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "admin").await;

    let engine = json!({
        "id": "MM1ET00900",
        "designation": "NACELLE ELEVATRICE 12M",
        "family": "ACCESSOIRES MANUTENTION",
        "type": "Accessoires",
        "operatingHours": 310,
        "metadata": { "location": "Warehouse D" }
    });

    let response = client
        .post(format!("{}/engines", base_url))
        .bearer_auth(&token)
        .json(&engine)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["status"], "available");

    let response = client
        .post(format!("{}/engines", base_url))
        .bearer_auth(&token)
        .json(&engine)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Duplicate");

    let mut updated = engine.clone();
    updated["designation"] = json!("NACELLE ELEVATRICE 14M");
    let response = client
        .put(format!("{}/engines/MM1ET00900", base_url))
        .bearer_auth(&token)
        .json(&updated)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let fetched: Value = client
        .get(format!("{}/engines/MM1ET00900", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched["designation"], "NACELLE ELEVATRICE 14M");

    let response = client
        .delete(format!("{}/engines/MM1ET00900", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/engines/MM1ET00900", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_engine_is_rejected() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "admin").await;

    let response = client
        .post(format!("{}/engines", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "id": "lower-case",
            "designation": "Crane",
            "family": "GRUES MOBILES",
            "type": "Levage"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_bulk_create_partial_success() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "admin").await;

    let body: Value = client
        .post(format!("{}/engines/bulk", base_url))
        .bearer_auth(&token)
        .json(&json!({
            "engines": [
                { "id": "MM1ET00901", "designation": "GRUE 20T", "familleNormalisee": "GRUES MOBILES", "type": "levage" },
                { "id": "MM1ET00803", "designation": "Duplicate", "family": "GRUES MOBILES", "type": "Levage" },
                { "id": "MM1ET00902", "designation": "", "family": "GRUES MOBILES" }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["createdEngines"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["createdEngines"][0]["type"], "Levage");
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["index"], 1);
    assert_eq!(errors[1]["engineId"], "MM1ET00902");
}

#[tokio::test]
async fn test_filtered_disponibility_listing() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "admin").await;

    let body: Value = client
        .get(format!("{}/disponibility?engineType=Roulants", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["available"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["unavailable"][0]["id"], "MM1ET00805");

    let body: Value = client
        .get(format!("{}/engines?search=warehouse", base_url))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["engines"][0]["id"], "MM1ET00806");
}

#[tokio::test]
async fn test_server_conflict_rules() {
    let base_url = spawn_server().await;
    let client = Client::new();
    let token = get_auth_token(&client, &base_url, "admin").await;

    // Already available
    let response = client
        .post(format!("{}/disponibility/move", base_url))
        .bearer_auth(&token)
        .json(&json!({ "engineId": "MM1ET00803", "to": "available" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Unavailable engines cannot be assigned
    let response = client
        .post(format!("{}/affectation/assign", base_url))
        .bearer_auth(&token)
        .json(&json!({ "engineId": "MM1ET00805", "demandeur": "DEPA" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .post(format!("{}/affectation/assign", base_url))
        .bearer_auth(&token)
        .json(&json!({ "engineId": "UNKNOWN", "demandeur": "DEPA" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
