//! Integration tests for the parts manufacturer API.
//!
//! Each test starts its own [`TestServer`]: the real router bound to
//! `127.0.0.1:0`, backed by a fresh [`MemoryStore`], with Stripe replaced by
//! a local stub. Tests talk to it over HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p parts-integration-tests
//! ```
//!
//! No database or network access is needed.

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Form, Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{Duration, Utc};
use mongodb::bson::doc;
use secrecy::SecretString;
use serde_json::json;

use parts_core::Email;
use parts_server::config::{MongoConfig, ServerConfig, StripeConfig};
use parts_server::db::{Collection, DocumentStore, MemoryStore};
use parts_server::routes;
use parts_server::state::AppState;

/// Signing secret used by every test server.
pub const TEST_TOKEN_SECRET: &str = "t3St$k9#Qm2!vX7@pL4&nR8*wZ1^bH6%";

/// Stripe's minimum charge in minor units; the stub declines anything lower.
pub const STRIPE_MINIMUM_AMOUNT: i64 = 50;

/// A running API server with an in-memory store.
pub struct TestServer {
    base_url: String,
    client: reqwest::Client,
    store: Arc<MemoryStore>,
    state: AppState,
    stripe: FakeStripe,
}

impl TestServer {
    /// Start the API and a Stripe stub on ephemeral ports.
    pub async fn start() -> Self {
        let stripe = FakeStripe::start().await;
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn DocumentStore> = store.clone();

        let state = AppState::new(test_config(&stripe.base_url), shared)
            .expect("Failed to build application state");

        let addr = serve(routes::router(state.clone())).await;

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            store,
            state,
            stripe,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// HTTP client for requests against this server.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The backing store, for seeding and inspecting documents.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Form bodies received by the Stripe stub, in order.
    #[must_use]
    pub fn stripe_requests(&self) -> Vec<HashMap<String, String>> {
        self.stripe.requests()
    }

    /// A valid access token for `email`.
    #[must_use]
    pub fn token_for(&self, email: &str) -> String {
        self.state
            .tokens()
            .issue(&email_of(email))
            .expect("Failed to issue token")
    }

    /// An access token for `email` that expired an hour ago.
    #[must_use]
    pub fn expired_token_for(&self, email: &str) -> String {
        self.state
            .tokens()
            .issue_at(&email_of(email), Utc::now() - Duration::hours(25))
            .expect("Failed to issue token")
    }

    /// Store a profile for `email` with the admin role and return its token.
    pub async fn seed_admin(&self, email: &str) -> String {
        self.store
            .insert_one(Collection::Profiles, doc! { "email": email, "role": "admin" })
            .await
            .expect("Failed to seed admin profile");
        self.token_for(email)
    }

    /// Store an order placed under `email` and return its id.
    pub async fn seed_order(&self, email: &str, status: &str) -> String {
        self.store
            .insert_one(
                Collection::Orders,
                doc! { "email": email, "partName": "Gear", "quantity": 100_i64, "status": status },
            )
            .await
            .expect("Failed to seed order")
            .inserted_id
    }
}

fn email_of(email: &str) -> Email {
    Email::parse(email).expect("Invalid test email")
}

fn test_config(stripe_base: &str) -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        mongodb: MongoConfig {
            uri: SecretString::from("mongodb://localhost:27017"),
            database: "manufacturer".to_owned(),
        },
        token_secret: SecretString::from(TEST_TOKEN_SECRET),
        stripe: StripeConfig {
            secret_key: SecretString::from("sk_test_integration"),
            api_base: stripe_base.to_owned(),
            currency: "usd".to_owned(),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 0.0,
        sentry_traces_sample_rate: 0.0,
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    addr
}

/// Local stand-in for the Stripe payment intents endpoint.
struct FakeStripe {
    base_url: String,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl FakeStripe {
    async fn start() -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/payment_intents", post(create_payment_intent))
            .with_state(requests.clone());

        let addr = serve(app).await;
        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().expect("Stub state poisoned").clone()
    }
}

async fn create_payment_intent(
    State(requests): State<Arc<Mutex<Vec<HashMap<String, String>>>>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "Bearer sk_test_integration");
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let amount = form
        .get("amount")
        .and_then(|amount| amount.parse::<i64>().ok())
        .unwrap_or_default();
    requests.lock().expect("Stub state poisoned").push(form);

    if amount < STRIPE_MINIMUM_AMOUNT {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": "amount_too_small" } })),
        )
            .into_response();
    }

    Json(json!({
        "id": "pi_test_123",
        "object": "payment_intent",
        "client_secret": "pi_test_123_secret_456",
        "amount": amount,
    }))
    .into_response()
}
