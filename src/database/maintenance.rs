// file: src/database/maintenance.rs
// description: counting and emptying the required collections

use crate::config::CollectionsConfig;
use crate::database::store::CollectionStore;
use crate::error::Result;
use crate::models::CollectionCount;
use tracing::{info, warn};

pub struct Maintenance<'a> {
    store: &'a dyn CollectionStore,
    collections: &'a CollectionsConfig,
}

impl<'a> Maintenance<'a> {
    pub fn new(store: &'a dyn CollectionStore, collections: &'a CollectionsConfig) -> Self {
        Self { store, collections }
    }

    pub async fn stats(&self) -> Result<Vec<CollectionCount>> {
        let existing = self.store.list_collections().await?;

        let mut counts = Vec::new();
        for name in self.collections.required() {
            let exists = existing.iter().any(|e| e == name);
            let documents = if exists {
                self.store.count_documents(name).await?
            } else {
                0
            };

            counts.push(CollectionCount {
                collection: name.to_string(),
                exists,
                documents,
            });
        }

        Ok(counts)
    }

    /// Deletes all documents from the required collections. The collections
    /// themselves survive.
    pub async fn clean(&self) -> Result<u64> {
        warn!(
            "Deleting all documents from {} in '{}'",
            self.collections.required().join(", "),
            self.store.database_name()
        );

        let mut total = 0;
        for name in self.collections.required() {
            let deleted = self.store.delete_all(name).await?;
            info!("Deleted {} documents from '{}'", deleted, name);
            total += deleted;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_stats_reports_missing_as_zero() {
        let store = MemoryStore::with_collections("up_db", &["documents"]);
        store
            .insert_documents("documents", vec![json!({"file_id": "a"})])
            .await
            .unwrap();
        let collections = Config::default_config().collections;

        let stats = Maintenance::new(&store, &collections).stats().await.unwrap();

        assert_eq!(
            stats,
            vec![
                CollectionCount {
                    collection: "documents".to_string(),
                    exists: true,
                    documents: 1,
                },
                CollectionCount {
                    collection: "summaries".to_string(),
                    exists: false,
                    documents: 0,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_clean_empties_but_keeps_collections() {
        let store = MemoryStore::with_collections("up_db", &["documents", "summaries", "system_prompts"]);
        store
            .insert_documents("documents", vec![json!({"file_id": "a"}), json!({"file_id": "b"})])
            .await
            .unwrap();
        store
            .insert_documents("summaries", vec![json!({"file_id": "a", "summary": "s"})])
            .await
            .unwrap();
        store
            .insert_documents("system_prompts", vec![json!({"prompt_id": "A"})])
            .await
            .unwrap();
        let collections = Config::default_config().collections;

        let deleted = Maintenance::new(&store, &collections).clean().await.unwrap();

        assert_eq!(deleted, 3);
        assert_eq!(store.count_documents("documents").await.unwrap(), 0);
        assert_eq!(store.count_documents("system_prompts").await.unwrap(), 1);
        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["documents", "summaries", "system_prompts"]
        );
    }
}
