//! Payment records and payment request bodies.

use parts_core::Price;
use serde::{Deserialize, Serialize};

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: Price,
}

/// Body of `PATCH /order/{id}`, sent by the client once the provider has
/// confirmed the charge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub transaction_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
}

/// A document appended to the `payments` collection.
///
/// Linked to its order only by `orderId` and `transactionId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub order_id: String,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
}
