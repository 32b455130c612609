//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                       - Greeting
//! GET    /health                 - Liveness
//! GET    /health/ready           - Readiness (store ping)
//!
//! # Parts
//! GET    /parts                  - All parts
//! POST   /parts                  - Add part (admin)
//! PUT    /updateparts/{id}       - Set available quantity (upsert)
//! DELETE /parts/{id}             - Remove part (admin)
//! GET    /purchase/{id}          - Single part, or null
//!
//! # Reviews
//! GET    /reviews                - All reviews
//! POST   /reviews                - Add review (token)
//!
//! # Profiles
//! GET    /getprofile?email=      - Profile by email, or null
//! PUT    /updateprofile/{email}  - Partial profile upsert
//! GET    /getuser                - All profiles (admin)
//! PUT    /makeadmin/{id}         - Grant admin role (admin)
//! GET    /admin/{email}          - {"admin": bool}
//!
//! # Orders
//! POST   /placeorder             - Place order
//! GET    /orders                 - All orders (admin)
//! GET    /order/{id}             - Single order, or null (token)
//! PATCH  /status/{id}            - Set order status (token)
//! GET    /myorder?email=         - Orders by email (token)
//! DELETE /order/{email}          - Delete first order with email (token)
//!
//! # Payments
//! POST   /create-payment-intent  - Stripe payment intent (token)
//! PATCH  /order/{id}             - Record payment, mark order paid (token)
//!
//! # Auth
//! POST   /login                  - Issue access token
//! ```

pub mod auth;
pub mod home;
pub mod orders;
pub mod parts;
pub mod payments;
pub mod profiles;
pub mod reviews;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::{get, patch, post, put},
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use parts_core::{DocumentId, Email};

use crate::error::{AppError, Result};
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// JSON body extractor whose rejections are `AppError::BadRequest`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections are `AppError::BadRequest`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `?email=` query string.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Parse a document id taken from the path.
pub(crate) fn parse_id(raw: &str) -> Result<DocumentId> {
    DocumentId::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Parse an email taken from the path or query string.
pub(crate) fn parse_email(raw: &str) -> Result<Email> {
    Email::parse(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// All API routes.
///
/// `/order/{id}` carries an email, not an id, for `DELETE`; the router
/// requires one parameter name per path.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::greeting))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        // Parts
        .route("/parts", get(parts::list).post(parts::create))
        .route("/parts/{id}", axum::routing::delete(parts::delete))
        .route("/updateparts/{id}", put(parts::update_quantity))
        .route("/purchase/{id}", get(parts::show))
        // Reviews
        .route("/reviews", get(reviews::list).post(reviews::create))
        // Profiles
        .route("/getprofile", get(profiles::show))
        .route("/updateprofile/{email}", put(profiles::update))
        .route("/getuser", get(profiles::list))
        .route("/makeadmin/{id}", put(profiles::make_admin))
        .route("/admin/{email}", get(profiles::admin_status))
        // Orders
        .route("/placeorder", post(orders::place))
        .route("/orders", get(orders::list))
        .route(
            "/order/{id}",
            get(orders::show)
                .patch(payments::confirm)
                .delete(orders::delete_by_email),
        )
        .route("/status/{id}", patch(orders::set_status))
        .route("/myorder", get(orders::mine))
        // Payments
        .route("/create-payment-intent", post(payments::create_intent))
        // Auth
        .route("/login", post(auth::login))
}

/// The API router with its tracing, request id, and CORS layers applied.
///
/// Sentry layers are added by the binary.
pub fn router(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_malformed() {
        assert!(parse_id("65a1f0c2b3d4e5f6a7b8c9d0").is_ok());
        assert!(matches!(parse_id("42"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_parse_email_rejects_malformed() {
        assert!(parse_email("a@b.com").is_ok());
        assert!(matches!(parse_email("nobody"), Err(AppError::BadRequest(_))));
    }
}
