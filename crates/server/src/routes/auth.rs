//! Login handler.

use axum::{Json, extract::State};
use serde::Serialize;

use super::ApiJson;
use crate::error::Result;
use crate::models::LoginRequest;
use crate::state::AppState;

/// Body of `POST /login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

/// Issue an access token for the email in the body.
///
/// There is no credential check: identity is established by the client
/// before it calls this route.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AccessToken>> {
    let access_token = state.tokens().issue(&request.email)?;
    tracing::debug!(email = %request.email, "Access token issued");
    Ok(Json(AccessToken { access_token }))
}
