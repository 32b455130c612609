//! Review repository.

use mongodb::bson::doc;

use super::{Collection, DocumentStore, InsertOutcome, StoreError, decode_all, encode};
use crate::models::{NewReview, Review};

/// Repository for the `reviews` collection.
pub struct ReviewRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// All reviews, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails or a document is malformed.
    pub async fn list(&self) -> Result<Vec<Review>, StoreError> {
        let docs = self.store.find(Collection::Reviews, doc! {}).await?;
        decode_all(docs)
    }

    /// Store a review.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the insert fails.
    pub async fn create(&self, review: &NewReview) -> Result<InsertOutcome, StoreError> {
        self.store
            .insert_one(Collection::Reviews, encode(review)?)
            .await
    }
}
