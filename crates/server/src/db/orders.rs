//! Order repository.

use mongodb::bson::doc;
use parts_core::{DocumentId, Email};

use super::{
    Collection, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome, decode,
    decode_all, encode, id_filter,
};
use crate::models::{NewOrder, Order};

/// Repository for the `orders` collection.
pub struct OrderRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All orders, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a document is malformed.
    pub async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let docs = self.store.find(Collection::Orders, doc! {}).await?;
        decode_all(docs)
    }

    /// All orders placed under `email`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a document is malformed.
    pub async fn list_by_email(&self, email: &Email) -> Result<Vec<Order>, StoreError> {
        let docs = self
            .store
            .find(Collection::Orders, doc! { "email": email.as_str() })
            .await?;
        decode_all(docs)
    }

    /// A single order, if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the document is malformed.
    pub async fn get(&self, id: &DocumentId) -> Result<Option<Order>, StoreError> {
        self.store
            .find_one(Collection::Orders, id_filter(id)?)
            .await?
            .map(decode)
            .transpose()
    }

    /// Store a new order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<InsertOutcome, StoreError> {
        self.store.insert_one(Collection::Orders, encode(order)?).await
    }

    /// Set the status of an existing order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn set_status(
        &self,
        id: &DocumentId,
        status: &str,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(
                Collection::Orders,
                id_filter(id)?,
                doc! { "status": status },
                false,
            )
            .await
    }

    /// Flag an existing order as paid by `transaction_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn mark_paid(
        &self,
        id: &DocumentId,
        transaction_id: &str,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(
                Collection::Orders,
                id_filter(id)?,
                doc! { "paid": true, "transactionId": transaction_id },
                false,
            )
            .await
    }

    /// Delete the first order placed under `email`.
    ///
    /// Other orders sharing the email are left in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    pub async fn delete_first_by_email(&self, email: &Email) -> Result<DeleteOutcome, StoreError> {
        self.store
            .delete_one(Collection::Orders, doc! { "email": email.as_str() })
            .await
    }
}
