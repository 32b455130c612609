//! Profile and role handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::{ApiJson, ApiQuery, EmailQuery, parse_email, parse_id};
use crate::db::{ProfileRepository, UpdateOutcome};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Profile, ProfileUpdate};
use crate::state::AppState;

/// Body of `GET /admin/{email}`.
#[derive(Debug, Serialize)]
pub struct AdminStatus {
    pub admin: bool,
}

/// Profile for `?email=`; `null` if there is none.
pub async fn show(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> Result<Json<Option<Profile>>> {
    let email = parse_email(&query.email)?;
    let profile = ProfileRepository::new(state.store())
        .get_by_email(&email)
        .await?;
    Ok(Json(profile))
}

/// Create or partially update the profile stored under `email`.
///
/// Only fields present in the body are written.
pub async fn update(
    State(state): State<AppState>,
    Path(email): Path<String>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<UpdateOutcome>> {
    let email = parse_email(&email)?;
    if update.is_empty() {
        return Err(AppError::BadRequest(
            "profile update has no fields".to_owned(),
        ));
    }

    let outcome = ProfileRepository::new(state.store())
        .upsert_by_email(&email, &update)
        .await?;
    Ok(Json(outcome))
}

/// List every profile.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Profile>>> {
    let profiles = ProfileRepository::new(state.store()).list().await?;
    Ok(Json(profiles))
}

/// Grant the admin role to a profile.
#[instrument(skip_all, fields(admin = %admin.email, id = %id))]
pub async fn make_admin(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_id(&id)?;
    let outcome = ProfileRepository::new(state.store()).make_admin(&id).await?;
    tracing::info!(
        matched = outcome.matched_count,
        upserted = outcome.upserted_count,
        "Admin role granted"
    );
    Ok(Json(outcome))
}

/// Whether the profile stored under `email` is an admin.
///
/// Unknown emails report `false`.
pub async fn admin_status(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>> {
    let email = parse_email(&email)?;
    let admin = ProfileRepository::new(state.store())
        .is_admin(&email)
        .await?;
    Ok(Json(AdminStatus { admin }))
}
