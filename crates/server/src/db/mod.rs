//! Document store access.
//!
//! # Database: `manufacturer`
//!
//! All data lives in schema-less collections of BSON documents:
//!
//! ## Collections
//!
//! - `parts` - Catalogue of manufactured parts
//! - `reviews` - Customer reviews
//! - `profiles` - User profiles, keyed by email, carrying the `role` field
//! - `orders` - Placed orders with status and payment flag
//! - `payments` - Append-only record of completed transactions
//!
//! Handlers never talk to the driver directly. They build a repository over
//! the [`DocumentStore`] held in application state, which is either a
//! [`MongoStore`] (production) or a [`MemoryStore`] (tests).

pub mod memory;
pub mod mongo;
pub mod orders;
pub mod parts;
pub mod payments;
pub mod profiles;
pub mod reviews;

use futures::future::BoxFuture;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use parts_core::DocumentId;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use orders::OrderRepository;
pub use parts::PartRepository;
pub use payments::PaymentRepository;
pub use profiles::ProfileRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the `MongoDB` driver.
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// A stored document does not match its record type, or a record could
    /// not be encoded.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The collections of the `manufacturer` database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Parts,
    Reviews,
    Profiles,
    Orders,
    Payments,
}

impl Collection {
    /// Collection name in the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parts => "parts",
            Self::Reviews => "reviews",
            Self::Profiles => "profiles",
            Self::Orders => "orders",
            Self::Payments => "payments",
        }
    }
}

/// Result of an insert, returned to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Result of an update or upsert, returned to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

/// Result of a delete, returned to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// The operations the API performs against its document store.
///
/// Filters are top-level equality matches. There is no transaction support:
/// each call is independent, and concurrent writes to one document are
/// last-write-wins.
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, in store order.
    fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Vec<Document>, StoreError>>;

    /// The first document matching `filter`.
    fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Option<Document>, StoreError>>;

    /// Insert a document; the store assigns `_id`.
    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertOutcome, StoreError>>;

    /// `$set` the fields of `set` on the first document matching `filter`.
    ///
    /// With `upsert`, a missing document is created from `filter` and `set`.
    fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> BoxFuture<'_, Result<UpdateOutcome, StoreError>>;

    /// Delete the first document matching `filter`.
    fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<DeleteOutcome, StoreError>>;

    /// Check connectivity.
    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>>;
}

/// Filter matching a single document by its object id.
pub(crate) fn id_filter(id: &DocumentId) -> Result<Document, StoreError> {
    let oid = ObjectId::parse_str(id.as_str())
        .map_err(|e| StoreError::DataCorruption(format!("invalid object id {id}: {e}")))?;
    Ok(doc! { "_id": oid })
}

/// Render an id value the way clients see it.
pub(crate) fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode a stored document into a record, rendering `_id` as hex.
pub(crate) fn decode<T: DeserializeOwned>(mut document: Document) -> Result<T, StoreError> {
    if let Some(id) = document.get("_id").map(id_to_string) {
        document.insert("_id", id);
    }
    bson::from_document(document)
        .map_err(|e| StoreError::DataCorruption(format!("failed to decode document: {e}")))
}

/// Decode every document of a query result.
pub(crate) fn decode_all<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>, StoreError> {
    documents.into_iter().map(decode).collect()
}

/// Encode a record into a document for insertion or `$set`.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    bson::to_document(value)
        .map_err(|e| StoreError::DataCorruption(format!("failed to encode document: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Named {
        #[serde(rename = "_id")]
        id: String,
        name: Option<String>,
    }

    #[test]
    fn test_decode_renders_object_id_as_hex() {
        let oid = ObjectId::new();
        let named: Named = decode(doc! { "_id": oid, "name": "bolt" }).unwrap();
        assert_eq!(named.id, oid.to_hex());
        assert_eq!(named.name.as_deref(), Some("bolt"));
    }

    #[test]
    fn test_decode_type_mismatch_is_corruption() {
        let result: Result<Named, _> = decode(doc! { "_id": 1_i32, "name": 5_i32 });
        assert!(matches!(result, Err(StoreError::DataCorruption(_))));
    }

    #[test]
    fn test_id_filter_uses_object_id() {
        let id = DocumentId::parse("65a1f0c2b3d4e5f6a7b8c9d0").unwrap();
        let filter = id_filter(&id).unwrap();
        assert!(matches!(filter.get("_id"), Some(Bson::ObjectId(_))));
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = UpdateOutcome {
            acknowledged: true,
            matched_count: 1,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["matchedCount"], 1);
        assert_eq!(json["upsertedId"], serde_json::Value::Null);
    }
}
