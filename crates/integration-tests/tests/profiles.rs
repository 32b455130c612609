//! Integration tests for profiles and the admin role.

use mongodb::bson::{Bson, doc};
use parts_integration_tests::TestServer;
use parts_server::db::{Collection, DocumentStore};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn update_profile(server: &TestServer, email: &str, body: Value) -> reqwest::Response {
    server
        .client()
        .put(server.url(&format!("/updateprofile/{email}")))
        .json(&body)
        .send()
        .await
        .expect("Request failed")
}

async fn get_profile(server: &TestServer, email: &str) -> Value {
    let resp = server
        .client()
        .get(server.url(&format!("/getprofile?email={email}")))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid JSON")
}

async fn admin_status(server: &TestServer, email: &str) -> Value {
    let resp = server
        .client()
        .get(server.url(&format!("/admin/{email}")))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid JSON")
}

#[tokio::test]
async fn test_update_profile_creates_then_merges() {
    let server = TestServer::start().await;

    let resp = update_profile(
        &server,
        "ada@b.com",
        json!({ "name": "Ada", "location": "London" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["upsertedCount"], 1);
    assert!(outcome["upsertedId"].is_string());

    let resp = update_profile(&server, "ada@b.com", json!({ "name": "Ada Lovelace" })).await;
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["matchedCount"], 1);
    assert_eq!(outcome["modifiedCount"], 1);
    assert_eq!(outcome["upsertedId"], Value::Null);

    let profile = get_profile(&server, "ada@b.com").await;
    assert_eq!(profile["name"], "Ada Lovelace");
    assert_eq!(profile["location"], "London");
    assert_eq!(profile["email"], "ada@b.com");
    assert!(profile["_id"].is_string());
}

#[tokio::test]
async fn test_update_profile_cannot_grant_admin() {
    let server = TestServer::start().await;

    let resp = update_profile(
        &server,
        "eve@b.com",
        json!({ "name": "Eve", "role": "admin" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(admin_status(&server, "eve@b.com").await, json!({ "admin": false }));
}

#[tokio::test]
async fn test_update_profile_rejects_bad_input() {
    let server = TestServer::start().await;

    let resp = update_profile(&server, "ada@b.com", json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = update_profile(&server, "not-an-email", json!({ "name": "Ada" })).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Invalid JSON");
    assert!(body["message"].is_string());

    assert!(server.store().is_empty(Collection::Profiles).await);
}

#[tokio::test]
async fn test_get_missing_profile_is_null() {
    let server = TestServer::start().await;
    assert_eq!(get_profile(&server, "ghost@b.com").await, Value::Null);
}

#[tokio::test]
async fn test_admin_status() {
    let server = TestServer::start().await;
    server.seed_admin("root@b.com").await;
    server
        .store()
        .insert_one(
            Collection::Profiles,
            doc! { "email": "user@b.com", "role": "Admin" },
        )
        .await
        .expect("seed");
    server
        .store()
        .insert_one(Collection::Profiles, doc! { "email": "plain@b.com" })
        .await
        .expect("seed");

    assert_eq!(admin_status(&server, "root@b.com").await, json!({ "admin": true }));
    assert_eq!(admin_status(&server, "user@b.com").await, json!({ "admin": false }));
    assert_eq!(admin_status(&server, "plain@b.com").await, json!({ "admin": false }));
    assert_eq!(admin_status(&server, "ghost@b.com").await, json!({ "admin": false }));
}

#[tokio::test]
async fn test_admin_status_with_non_string_role() {
    let server = TestServer::start().await;
    let roles: [Bson; 3] = [true.into(), 1.into(), doc! { "name": "admin" }.into()];
    for role in roles {
        server
            .store()
            .insert_one(Collection::Profiles, doc! { "email": "odd@b.com", "role": role })
            .await
            .expect("seed");
        assert_eq!(admin_status(&server, "odd@b.com").await, json!({ "admin": false }));
        server
            .store()
            .delete_one(Collection::Profiles, doc! { "email": "odd@b.com" })
            .await
            .expect("cleanup");
    }

    let resp = server
        .client()
        .get(server.url("/getuser"))
        .bearer_auth(server.token_for("odd@b.com"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_with_numeric_phone_keeps_access() {
    let server = TestServer::start().await;
    server
        .store()
        .insert_one(
            Collection::Profiles,
            doc! { "email": "root@b.com", "role": "admin", "phone": 5_550_100_i64 },
        )
        .await
        .expect("seed");
    server
        .store()
        .insert_one(
            Collection::Profiles,
            doc! { "email": "odd@b.com", "role": true, "education": 12 },
        )
        .await
        .expect("seed");

    assert_eq!(admin_status(&server, "root@b.com").await, json!({ "admin": true }));

    let resp = server
        .client()
        .get(server.url("/getuser"))
        .bearer_auth(server.token_for("root@b.com"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let profiles: Vec<Value> = resp.json().await.expect("Invalid JSON");
    assert_eq!(profiles.len(), 2);

    let root = get_profile(&server, "root@b.com").await;
    assert_eq!(root["phone"], "5550100");
    assert_eq!(root["role"], "admin");

    let odd = get_profile(&server, "odd@b.com").await;
    assert_eq!(odd["education"], "12");
    assert_eq!(odd["role"], Value::Null);
}

#[tokio::test]
async fn test_admin_lists_profiles_and_promotes() {
    let server = TestServer::start().await;
    let admin = server.seed_admin("root@b.com").await;
    let user_id = server
        .store()
        .insert_one(Collection::Profiles, doc! { "email": "user@b.com" })
        .await
        .expect("seed")
        .inserted_id;

    let profiles: Value = server
        .client()
        .get(server.url("/getuser"))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(profiles.as_array().map(Vec::len), Some(2));

    let resp = server
        .client()
        .put(server.url(&format!("/makeadmin/{user_id}")))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["matchedCount"], 1);

    assert_eq!(admin_status(&server, "user@b.com").await, json!({ "admin": true }));

    // The promoted user now passes the admin check.
    let resp = server
        .client()
        .get(server.url("/getuser"))
        .bearer_auth(server.token_for("user@b.com"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_make_admin_rejects_malformed_id() {
    let server = TestServer::start().await;
    let admin = server.seed_admin("root@b.com").await;

    let resp = server
        .client()
        .put(server.url("/makeadmin/12345"))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
