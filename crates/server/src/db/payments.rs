//! Payment repository.

use super::{Collection, DocumentStore, InsertOutcome, StoreError, encode};
use crate::models::NewPayment;

/// Repository for the append-only `payments` collection.
pub struct PaymentRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PaymentRepository<'a> {
    /// Create a new payment repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Record a completed transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    pub async fn create(&self, payment: &NewPayment) -> Result<InsertOutcome, StoreError> {
        self.store
            .insert_one(Collection::Payments, encode(payment)?)
            .await
    }
}
