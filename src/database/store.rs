// file: src/database/store.rs
// description: backend-neutral view of a database as a set of named collections
// reference: https://docs.rs/async-trait

use crate::error::Result;
use crate::models::EnsureOutcome;
use async_trait::async_trait;
use serde_json::Value;

/// A selected database whose collections can be listed, created and counted.
///
/// Implementations surface driver failures unchanged; nothing here retries.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    fn database_name(&self) -> &str;

    async fn ping(&self) -> Result<()>;

    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Creates `name`. Returns [`EnsureOutcome::AlreadyPresent`] when the
    /// server reports the collection exists, e.g. after losing a race.
    async fn create_collection(&self, name: &str) -> Result<EnsureOutcome>;

    /// Number of documents in `name`; zero when the collection is absent.
    async fn count_documents(&self, name: &str) -> Result<u64>;

    /// Inserts JSON objects, implicitly creating the collection.
    async fn insert_documents(&self, name: &str, documents: Vec<Value>) -> Result<u64>;

    /// Deletes every document in `name`, keeping the collection itself.
    async fn delete_all(&self, name: &str) -> Result<u64>;

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let names = self.list_collections().await?;
        Ok(names.iter().any(|existing| existing == name))
    }
}
