//! Integration tests for orders.

use parts_integration_tests::TestServer;
use parts_server::db::Collection;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn my_orders(server: &TestServer, token: &str, email: &str) -> Vec<Value> {
    let resp = server
        .client()
        .get(server.url(&format!("/myorder?email={email}")))
        .bearer_auth(token)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Invalid JSON")
}

#[tokio::test]
async fn test_place_order_then_list_mine() {
    let server = TestServer::start().await;
    let token = server.token_for("buyer@b.com");

    let resp = server
        .client()
        .post(server.url("/placeorder"))
        .json(&json!({
            "email": "buyer@b.com",
            "partId": "65a1f0c2b3d4e5f6a7b8c9d0",
            "partName": "Gear",
            "quantity": 120,
            "price": 12.5,
            "userName": "Buyer",
            "address": "1 Main St",
            "phone": "555-0100",
        }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["acknowledged"], true);
    assert!(outcome["insertedId"].is_string());

    server.seed_order("other@b.com", "pending").await;

    let orders = my_orders(&server, &token, "buyer@b.com").await;
    assert_eq!(orders.len(), 1);
    let order = orders.first().expect("one order");
    assert_eq!(order["_id"], outcome["insertedId"]);
    assert_eq!(order["partName"], "Gear");
    assert_eq!(order["quantity"], 120);
    assert_eq!(order["price"], 12.5);
}

#[tokio::test]
async fn test_place_order_requires_email() {
    let server = TestServer::start().await;

    for body in [json!({ "partName": "Gear" }), json!({ "email": "nope" })] {
        let resp = server
            .client()
            .post(server.url("/placeorder"))
            .json(&body)
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
    assert!(server.store().is_empty(Collection::Orders).await);
}

#[tokio::test]
async fn test_admin_lists_all_orders() {
    let server = TestServer::start().await;
    let admin = server.seed_admin("root@b.com").await;
    server.seed_order("a@b.com", "pending").await;
    server.seed_order("c@d.com", "pending").await;

    let orders: Vec<Value> = server
        .client()
        .get(server.url("/orders"))
        .bearer_auth(&admin)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn test_get_order_by_id() {
    let server = TestServer::start().await;
    let token = server.token_for("a@b.com");
    let id = server.seed_order("a@b.com", "pending").await;

    let order: Value = server
        .client()
        .get(server.url(&format!("/order/{id}")))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(order["_id"], id.as_str());
    assert_eq!(order["status"], "pending");

    let missing: Value = server
        .client()
        .get(server.url("/order/65a1f0c2b3d4e5f6a7b8c9d0"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(missing, Value::Null);

    let resp = server
        .client()
        .get(server.url("/order/not-an-id"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_status() {
    let server = TestServer::start().await;
    let token = server.token_for("a@b.com");
    let id = server.seed_order("a@b.com", "pending").await;

    let resp = server
        .client()
        .patch(server.url(&format!("/status/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["matchedCount"], 1);
    assert_eq!(outcome["modifiedCount"], 1);

    let orders = my_orders(&server, &token, "a@b.com").await;
    assert_eq!(orders.first().expect("one order")["status"], "shipped");
}

#[tokio::test]
async fn test_set_status_on_unknown_order_creates_nothing() {
    let server = TestServer::start().await;
    let token = server.token_for("a@b.com");

    let outcome: Value = server
        .client()
        .patch(server.url("/status/65a1f0c2b3d4e5f6a7b8c9d0"))
        .bearer_auth(&token)
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .expect("Request failed")
        .json()
        .await
        .expect("Invalid JSON");
    assert_eq!(outcome["matchedCount"], 0);
    assert_eq!(outcome["upsertedCount"], 0);
    assert!(server.store().is_empty(Collection::Orders).await);
}

#[tokio::test]
async fn test_delete_by_email_removes_one_order() {
    let server = TestServer::start().await;
    let token = server.token_for("a@b.com");
    let first = server.seed_order("a@b.com", "pending").await;
    let second = server.seed_order("a@b.com", "paid").await;

    let resp = server
        .client()
        .delete(server.url("/order/a@b.com"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["deletedCount"], 1);

    let remaining = my_orders(&server, &token, "a@b.com").await;
    assert_eq!(remaining.len(), 1);
    let remaining = remaining.first().expect("one order");
    assert_eq!(remaining["_id"], second.as_str());
    assert_ne!(remaining["_id"], first.as_str());

    let resp = server
        .client()
        .delete(server.url("/order/nobody@b.com"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Request failed");
    let outcome: Value = resp.json().await.expect("Invalid JSON");
    assert_eq!(outcome["deletedCount"], 0);
}
