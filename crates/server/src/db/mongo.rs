//! `MongoDB`-backed document store.

use futures::TryStreamExt;
use futures::future::BoxFuture;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use secrecy::ExposeSecret;

use super::{
    Collection, DeleteOutcome, DocumentStore, InsertOutcome, StoreError, UpdateOutcome,
    id_to_string,
};
use crate::config::MongoConfig;

/// Application name reported to the cluster.
const APP_NAME: &str = "parts-server";

/// Document store over a single `MongoDB` database.
///
/// The driver keeps its own connection pool; one `MongoStore` is built at
/// startup and shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to the configured cluster.
    ///
    /// Connection is lazy: this parses the URI (resolving SRV records) and
    /// builds the client, but the first round trip happens on first use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Database` if the URI is invalid or cannot be
    /// resolved.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri.expose_secret()).await?;
        options.app_name = Some(APP_NAME.to_owned());

        let client = Client::with_options(options)?;
        Ok(Self {
            database: client.database(&config.database),
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }

    async fn find_documents(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_document(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_document(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn update_document(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .upsert(upsert)
            .await?;

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id.as_ref().map(id_to_string),
        })
    }

    async fn delete_document(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<DeleteOutcome, StoreError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn run_ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

impl DocumentStore for MongoStore {
    fn find(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Vec<Document>, StoreError>> {
        Box::pin(self.find_documents(collection, filter))
    }

    fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<Option<Document>, StoreError>> {
        Box::pin(self.find_document(collection, filter))
    }

    fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> BoxFuture<'_, Result<InsertOutcome, StoreError>> {
        Box::pin(self.insert_document(collection, document))
    }

    fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
        upsert: bool,
    ) -> BoxFuture<'_, Result<UpdateOutcome, StoreError>> {
        Box::pin(self.update_document(collection, filter, set, upsert))
    }

    fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> BoxFuture<'_, Result<DeleteOutcome, StoreError>> {
        Box::pin(self.delete_document(collection, filter))
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        Box::pin(self.run_ping())
    }
}
