//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. CORS (permissive, the API is called from a separate web client)
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: handlers opt in through the
//! [`RequireToken`] and [`RequireAdmin`] extractors.

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, RequireAdmin, RequireToken};
pub use request_id::request_id_middleware;
