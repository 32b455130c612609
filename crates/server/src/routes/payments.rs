//! Payment handlers.
//!
//! The charge itself happens between the browser and Stripe. The server
//! creates the payment intent and, once the client reports the transaction,
//! records it and flags the order as paid.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::{ApiJson, parse_id};
use crate::db::{OrderRepository, PaymentRepository, UpdateOutcome};
use crate::error::{AppError, Result};
use crate::middleware::RequireToken;
use crate::models::{NewPayment, PaymentConfirmation, PaymentIntentRequest};
use crate::state::AppState;

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    pub client_secret: String,
}

/// Create a card payment intent for `price`.
#[instrument(skip_all, fields(email = %claims.email, price = %request.price))]
pub async fn create_intent(
    State(state): State<AppState>,
    RequireToken(claims): RequireToken,
    ApiJson(request): ApiJson<PaymentIntentRequest>,
) -> Result<Json<ClientSecret>> {
    let amount = request
        .price
        .to_minor_units()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let intent = state.payments().create_payment_intent(amount).await?;
    tracing::info!(intent = %intent.id, amount, "Payment intent created");

    Ok(Json(ClientSecret {
        client_secret: intent.client_secret,
    }))
}

/// Record a completed payment and mark its order paid.
///
/// Two independent writes: the payment is appended first, then the order is
/// updated. A failure between them leaves a payment with an unpaid order.
#[instrument(skip_all, fields(email = %claims.email, order = %id))]
pub async fn confirm(
    State(state): State<AppState>,
    RequireToken(claims): RequireToken,
    Path(id): Path<String>,
    ApiJson(confirmation): ApiJson<PaymentConfirmation>,
) -> Result<Json<UpdateOutcome>> {
    let id = parse_id(&id)?;

    let payment = NewPayment {
        order_id: id.to_string(),
        transaction_id: confirmation.transaction_id,
        email: confirmation.email,
        price: confirmation.price,
    };
    PaymentRepository::new(state.store()).create(&payment).await?;

    let outcome = OrderRepository::new(state.store())
        .mark_paid(&id, &payment.transaction_id)
        .await?;
    if outcome.matched_count == 0 {
        tracing::warn!("Payment recorded for unknown order");
    }

    Ok(Json(outcome))
}
