//! Authentication extractors.
//!
//! Callers present `Authorization: Bearer <token>`. A missing header is
//! answered with 401; a header whose token fails verification (bad
//! signature, expired, malformed, or no token after the scheme) with 403.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     RequireToken(claims): RequireToken,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.email)
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::db::{ProfileRepository, StoreError};
use crate::error::{AppError, set_sentry_user};
use crate::services::Claims;
use crate::state::AppState;

/// Extractor that requires a valid access token.
pub struct RequireToken(pub Claims);

/// Extractor that requires a valid access token whose holder has the admin
/// role in the `profiles` collection.
///
/// The role is read from the store on every request.
pub struct RequireAdmin(pub Claims);

/// Error returned when a request fails authentication or authorization.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization` header.
    MissingToken,
    /// The token did not verify.
    InvalidToken,
    /// The token verified, but the caller is not an admin.
    NotAdmin,
    /// The role lookup failed.
    Store(StoreError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let error = match self {
            Self::MissingToken => AppError::Unauthorized,
            Self::InvalidToken => AppError::INVALID_TOKEN,
            Self::NotAdmin => AppError::NOT_ADMIN,
            Self::Store(e) => AppError::Database(e),
        };
        error.into_response()
    }
}

impl FromRequestParts<AppState> for RequireToken {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthRejection::MissingToken)?;

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or(AuthRejection::InvalidToken)?;

        let claims = state.tokens().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AuthRejection::InvalidToken
        })?;

        set_sentry_user(claims.email.as_str());
        Ok(Self(claims))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireToken(claims) = RequireToken::from_request_parts(parts, state).await?;

        let is_admin = ProfileRepository::new(state.store())
            .is_admin(&claims.email)
            .await
            .map_err(AuthRejection::Store)?;

        if !is_admin {
            tracing::warn!(email = %claims.email, "Non-admin attempted admin operation");
            return Err(AuthRejection::NotAdmin);
        }

        Ok(Self(claims))
    }
}

/// The token following the auth scheme, e.g. `Bearer <token>`.
///
/// The scheme itself is not checked.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .split_once(' ')
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}
