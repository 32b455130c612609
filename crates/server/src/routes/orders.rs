//! Order handlers.
//!
//! Token-guarded routes only check that the token is valid. They do not
//! compare the token's email with the order being read or changed.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use super::{ApiJson, ApiQuery, EmailQuery, parse_email, parse_id};
use crate::db::{DeleteOutcome, InsertOutcome, OrderRepository, UpdateOutcome};
use crate::error::Result;
use crate::middleware::{RequireAdmin, RequireToken};
use crate::models::{NewOrder, Order, StatusUpdate};
use crate::state::AppState;

/// Place an order.
#[instrument(skip_all, fields(email = %order.email))]
pub async fn place(
    State(state): State<AppState>,
    ApiJson(order): ApiJson<NewOrder>,
) -> Result<Json<InsertOutcome>> {
    let outcome = OrderRepository::new(state.store()).create(&order).await?;
    tracing::info!(id = %outcome.inserted_id, "Order placed");
    Ok(Json(outcome))
}

/// List every order.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.store()).list().await?;
    Ok(Json(orders))
}

/// Single order; `null` if there is none.
pub async fn show(
    State(state): State<AppState>,
    RequireToken(_claims): RequireToken,
    Path(id): Path<String>,
) -> Result<Json<Option<Order>>> {
    let id = parse_id(&id)?;
    let order = OrderRepository::new(state.store()).get(&id).await?;
    Ok(Json(order))
}

/// Set the status of an order.
pub async fn set_status(
    State(state): State<AppState>,
    RequireToken(_claims): RequireToken,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_id(&id)?;
    let outcome = OrderRepository::new(state.store())
        .set_status(&id, &update.status)
        .await?;
    Ok(Json(outcome))
}

/// Orders placed under `?email=`.
pub async fn mine(
    State(state): State<AppState>,
    RequireToken(_claims): RequireToken,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> Result<Json<Vec<Order>>> {
    let email = parse_email(&query.email)?;
    let orders = OrderRepository::new(state.store())
        .list_by_email(&email)
        .await?;
    Ok(Json(orders))
}

/// Cancel an order, identified by the email it was placed under.
///
/// Only the first matching order is deleted.
#[instrument(skip_all, fields(caller = %claims.email))]
pub async fn delete_by_email(
    State(state): State<AppState>,
    RequireToken(claims): RequireToken,
    Path(email): Path<String>,
) -> Result<Json<DeleteOutcome>> {
    let email = parse_email(&email)?;
    let outcome = OrderRepository::new(state.store())
        .delete_first_by_email(&email)
        .await?;
    tracing::info!(deleted = outcome.deleted_count, "Order cancelled");
    Ok(Json(outcome))
}
