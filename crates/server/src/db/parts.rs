//! Part repository.

use mongodb::bson::doc;
use parts_core::DocumentId;

use super::{
    Collection, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome, decode,
    decode_all, encode, id_filter,
};
use crate::models::{NewPart, Part};

/// Repository for the `parts` collection.
pub struct PartRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> PartRepository<'a> {
    /// Create a new part repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All parts, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a document is malformed.
    pub async fn list(&self) -> Result<Vec<Part>, StoreError> {
        let docs = self.store.find(Collection::Parts, doc! {}).await?;
        decode_all(docs)
    }

    /// A single part, if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or the document is malformed.
    pub async fn get(&self, id: &DocumentId) -> Result<Option<Part>, StoreError> {
        self.store
            .find_one(Collection::Parts, id_filter(id)?)
            .await?
            .map(decode)
            .transpose()
    }

    /// Add a part to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    pub async fn create(&self, part: &NewPart) -> Result<InsertOutcome, StoreError> {
        self.store.insert_one(Collection::Parts, encode(part)?).await
    }

    /// Set the stock level of a part, creating the document if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the update fails.
    pub async fn set_available_quantity(
        &self,
        id: &DocumentId,
        quantity: u32,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store
            .update_one(
                Collection::Parts,
                id_filter(id)?,
                doc! { "availableQuantity": i64::from(quantity) },
                true,
            )
            .await
    }

    /// Remove a part.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the delete fails.
    pub async fn delete(&self, id: &DocumentId) -> Result<DeleteOutcome, StoreError> {
        self.store.delete_one(Collection::Parts, id_filter(id)?).await
    }
}
