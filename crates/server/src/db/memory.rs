//! In-process document store.
//!
//! Mirrors the subset of `MongoDB` semantics the API relies on: top-level
//! equality filters, `$set` updates applied to the first match, upserts that
//! seed the new document from the filter, and single-document deletes. It is
//! used by the test suites in place of a live cluster.

use std::collections::HashMap;

use futures::future::BoxFuture;
use mongodb::bson::{Bson, Document, oid::ObjectId};
use tokio::sync::RwLock;

use super::{
    Collection, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
    id_to_string,
};

/// A document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, Vec::len)
    }

    /// Returns `true` if `collection` holds no documents.
    pub async fn is_empty(&self, collection: Collection) -> bool {
        self.len(collection).await == 0
    }

    async fn find_documents(&self, collection: Collection, filter: &Document) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn find_document(&self, collection: Collection, filter: &Document) -> Option<Document> {
        self.collections
            .read()
            .await
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| matches(doc, filter)).cloned())
    }

    async fn insert_document(&self, collection: Collection, document: Document) -> InsertOutcome {
        let document = with_id(document);
        let inserted_id = document.get("_id").map(id_to_string).unwrap_or_default();

        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);

        InsertOutcome {
            acknowledged: true,
            inserted_id,
        }
    }

    async fn update_document(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> UpdateOutcome {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        if let Some(doc) = docs.iter_mut().find(|doc| matches(doc, &filter)) {
            let mut modified = false;
            for (key, value) in set {
                if doc.get(&key) != Some(&value) {
                    doc.insert(key, value);
                    modified = true;
                }
            }
            return UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            };
        }

        if !upsert {
            return UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            };
        }

        let mut document = filter;
        for (key, value) in set {
            document.insert(key, value);
        }
        let document = with_id(document);
        let upserted_id = document.get("_id").map(id_to_string);
        docs.push(document);

        UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id,
        }
    }

    async fn delete_document(&self, collection: Collection, filter: &Document) -> DeleteOutcome {
        let mut collections = self.collections.write().await;
        let deleted = collections.get_mut(&collection).and_then(|docs| {
            docs.iter()
                .position(|doc| matches(doc, filter))
                .map(|index| docs.remove(index))
        });

        DeleteOutcome {
            acknowledged: true,
            deleted_count: u64::from(deleted.is_some()),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Vec<Document>, StoreError>> {
        Box::pin(async move { Ok(self.find_documents(collection, &filter).await) })
    }

    fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Option<Document>, StoreError>> {
        Box::pin(async move { Ok(self.find_document(collection, &filter).await) })
    }

    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertOutcome, StoreError>> {
        Box::pin(async move { Ok(self.insert_document(collection, document).await) })
    }

    fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> BoxFuture<'_, Result<UpdateOutcome, StoreError>> {
        Box::pin(async move { Ok(self.update_document(collection, filter, set, upsert).await) })
    }

    fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<DeleteOutcome, StoreError>> {
        Box::pin(async move { Ok(self.delete_document(collection, &filter).await) })
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Top-level equality match.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

/// Ensure the document has an `_id`, placing a generated one first.
fn with_id(document: Document) -> Document {
    if document.contains_key("_id") {
        return document;
    }
    let mut with_id = Document::new();
    with_id.insert("_id", Bson::ObjectId(ObjectId::new()));
    for (key, value) in document {
        with_id.insert(key, value);
    }
    with_id
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_object_id() {
        let store = MemoryStore::new();
        let outcome = store
            .insert_one(Collection::Parts, doc! { "name": "gear" })
            .await
            .unwrap();

        assert_eq!(outcome.inserted_id.len(), 24);
        let stored = store
            .find_one(Collection::Parts, doc! { "name": "gear" })
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(stored.get("_id"), Some(Bson::ObjectId(_))));
    }

    #[tokio::test]
    async fn test_find_filters_by_equality() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Orders, doc! { "email": "a@b.com" })
            .await
            .unwrap();
        store
            .insert_one(Collection::Orders, doc! { "email": "c@d.com" })
            .await
            .unwrap();

        let all = store.find(Collection::Orders, doc! {}).await.unwrap();
        assert_eq!(all.len(), 2);

        let mine = store
            .find(Collection::Orders, doc! { "email": "a@b.com" })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn test_update_sets_fields_and_keeps_others() {
        let store = MemoryStore::new();
        store
            .insert_one(
                Collection::Profiles,
                doc! { "email": "a@b.com", "name": "Ada", "location": "Dhaka" },
            )
            .await
            .unwrap();

        let outcome = store
            .update_one(
                Collection::Profiles,
                doc! { "email": "a@b.com" },
                doc! { "name": "Grace" },
                true,
            )
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 1);
        assert_eq!(outcome.upserted_id, None);

        let profile = store
            .find_one(Collection::Profiles, doc! { "email": "a@b.com" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.get_str("name").unwrap(), "Grace");
        assert_eq!(profile.get_str("location").unwrap(), "Dhaka");
    }

    #[tokio::test]
    async fn test_update_same_value_is_not_modified() {
        let store = MemoryStore::new();
        store
            .insert_one(Collection::Orders, doc! { "status": "pending" })
            .await
            .unwrap();

        let outcome = store
            .update_one(
                Collection::Orders,
                doc! { "status": "pending" },
                doc! { "status": "pending" },
                false,
            )
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
    }

    #[tokio::test]
    async fn test_upsert_seeds_from_filter() {
        let store = MemoryStore::new();
        let outcome = store
            .update_one(
                Collection::Profiles,
                doc! { "email": "new@b.com" },
                doc! { "name": "Newcomer" },
                true,
            )
            .await
            .unwrap();

        assert_eq!(outcome.matched_count, 0);
        assert_eq!(outcome.upserted_count, 1);
        assert!(outcome.upserted_id.is_some());

        let profile = store
            .find_one(Collection::Profiles, doc! { "email": "new@b.com" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.get_str("name").unwrap(), "Newcomer");
    }

    #[tokio::test]
    async fn test_update_without_upsert_misses() {
        let store = MemoryStore::new();
        let outcome = store
            .update_one(
                Collection::Orders,
                doc! { "email": "nobody@b.com" },
                doc! { "status": "shipped" },
                false,
            )
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 0);
        assert!(store.is_empty(Collection::Orders).await);
    }

    #[tokio::test]
    async fn test_delete_removes_first_match_only() {
        let store = MemoryStore::new();
        for status in ["pending", "paid"] {
            store
                .insert_one(Collection::Orders, doc! { "email": "a@b.com", "status": status })
                .await
                .unwrap();
        }

        let outcome = store
            .delete_one(Collection::Orders, doc! { "email": "a@b.com" })
            .await
            .unwrap();
        assert_eq!(outcome.deleted_count, 1);

        let remaining = store.find(Collection::Orders, doc! {}).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get_str("status").unwrap(), "paid");
    }

    #[tokio::test]
    async fn test_delete_miss_reports_zero() {
        let store = MemoryStore::new();
        let outcome = store
            .delete_one(Collection::Parts, doc! { "name": "ghost" })
            .await
            .unwrap();
        assert_eq!(outcome.deleted_count, 0);
    }
}
