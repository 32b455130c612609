//! Part catalogue handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use super::{ApiJson, parse_id};
use crate::db::{DeleteOutcome, InsertOutcome, PartRepository, UpdateOutcome};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{NewPart, Part, QuantityUpdate};
use crate::state::AppState;

/// List every part.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Part>>> {
    let parts = PartRepository::new(state.store()).list().await?;
    Ok(Json(parts))
}

/// Single part for the purchase page; `null` if there is none.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Part>>> {
    let id = parse_id(&id)?;
    let part = PartRepository::new(state.store()).get(&id).await?;
    Ok(Json(part))
}

/// Add a part to the catalogue.
#[instrument(skip_all, fields(admin = %admin.email, part = %part.name))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(part): ApiJson<NewPart>,
) -> Result<Json<InsertOutcome>> {
    let outcome = PartRepository::new(state.store()).create(&part).await?;
    tracing::info!(id = %outcome.inserted_id, "Part created");
    Ok(Json(outcome))
}

/// Set the available quantity of a part.
///
/// Open to anonymous callers. A document is created if the id is unknown.
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<QuantityUpdate>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_id(&id)?;
    let outcome = PartRepository::new(state.store())
        .set_available_quantity(&id, update.available_quantity)
        .await?;
    Ok(Json(outcome))
}

/// Remove a part.
#[instrument(skip_all, fields(admin = %admin.email, id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let id = parse_id(&id)?;
    let outcome = PartRepository::new(state.store()).delete(&id).await?;
    Ok(Json(outcome))
}
