// file: src/database/memory.rs
// description: in-process collection store for dry runs and tests

use crate::database::store::CollectionStore;
use crate::error::{InitError, Result};
use crate::models::EnsureOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone)]
pub struct MemoryStore {
    database: String,
    collections: Arc<RwLock<BTreeMap<String, Vec<Value>>>>,
    reachable: bool,
}

impl MemoryStore {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collections: Arc::new(RwLock::new(BTreeMap::new())),
            reachable: true,
        }
    }

    pub fn with_collections(database: impl Into<String>, names: &[&str]) -> Self {
        let collections = names
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        Self {
            database: database.into(),
            collections: Arc::new(RwLock::new(collections)),
            reachable: true,
        }
    }

    /// Every call fails as if the server could not be reached.
    pub fn unreachable(database: impl Into<String>) -> Self {
        Self {
            reachable: false,
            ..Self::new(database)
        }
    }

    fn check_reachable(&self) -> Result<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(InitError::Connection {
                database: self.database.clone(),
                message: "server selection timed out".to_string(),
            })
        }
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.database
    }

    async fn ping(&self) -> Result<()> {
        self.check_reachable()
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        self.check_reachable()?;
        Ok(self.collections.read().await.keys().cloned().collect())
    }

    async fn create_collection(&self, name: &str) -> Result<EnsureOutcome> {
        self.check_reachable()?;

        let mut collections = self.collections.write().await;
        if collections.contains_key(name) {
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        collections.insert(name.to_string(), Vec::new());
        debug!("Created in-memory collection {}.{}", self.database, name);
        Ok(EnsureOutcome::Created)
    }

    async fn count_documents(&self, name: &str) -> Result<u64> {
        self.check_reachable()?;
        let collections = self.collections.read().await;
        Ok(collections.get(name).map_or(0, |docs| docs.len() as u64))
    }

    async fn insert_documents(&self, name: &str, documents: Vec<Value>) -> Result<u64> {
        self.check_reachable()?;

        if let Some(bad) = documents.iter().find(|doc| !doc.is_object()) {
            return Err(InitError::Serialization(format!(
                "Expected a JSON object, got {}",
                bad
            )));
        }

        let inserted = documents.len() as u64;
        self.collections
            .write()
            .await
            .entry(name.to_string())
            .or_default()
            .extend(documents);
        Ok(inserted)
    }

    async fn delete_all(&self, name: &str) -> Result<u64> {
        self.check_reachable()?;

        let mut collections = self.collections.write().await;
        let deleted = collections.get_mut(name).map_or(0, |docs| {
            let count = docs.len() as u64;
            docs.clear();
            count
        });
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_list() {
        let store = MemoryStore::new("up_db");
        assert_eq!(
            store.create_collection("summaries").await.unwrap(),
            EnsureOutcome::Created
        );
        assert_eq!(
            store.create_collection("summaries").await.unwrap(),
            EnsureOutcome::AlreadyPresent
        );
        assert_eq!(store.list_collections().await.unwrap(), vec!["summaries"]);
    }

    #[tokio::test]
    async fn test_insert_count_delete() {
        let store = MemoryStore::new("up_db");
        let inserted = store
            .insert_documents("documents", vec![json!({"file_id": "1"}), json!({"file_id": "2"})])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.count_documents("documents").await.unwrap(), 2);
        assert_eq!(store.delete_all("documents").await.unwrap(), 2);
        assert_eq!(store.count_documents("documents").await.unwrap(), 0);
        assert!(store.collection_exists("documents").await.unwrap());
        assert_eq!(store.count_documents("missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_rejects_non_object_documents() {
        let store = MemoryStore::new("up_db");
        let result = store.insert_documents("documents", vec![json!(42)]).await;
        assert!(matches!(result, Err(InitError::Serialization(_))));
        assert!(!store.collection_exists("documents").await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_every_call() {
        let store = MemoryStore::unreachable("up_db");
        assert!(store.ping().await.is_err());
        assert!(store.list_collections().await.is_err());
        assert!(store.create_collection("documents").await.is_err());
    }
}
