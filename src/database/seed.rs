// file: src/database/seed.rs
// description: opt-in insertion of the default system prompts

use crate::database::store::CollectionStore;
use crate::error::Result;
use crate::models::{SeedOutcome, SystemPrompt};
use crate::utils::validation::Validator;
use tracing::info;

pub struct Seeder<'a> {
    store: &'a dyn CollectionStore,
    collection: &'a str,
}

impl<'a> Seeder<'a> {
    pub fn new(store: &'a dyn CollectionStore, collection: &'a str) -> Self {
        Self { store, collection }
    }

    /// Inserts `prompts` only into an empty collection, so re-running
    /// never duplicates them.
    pub async fn seed(&self, prompts: &[SystemPrompt]) -> Result<SeedOutcome> {
        Validator::validate_collection_name(self.store.database_name(), self.collection)?;

        let existing = self.store.count_documents(self.collection).await?;
        if existing > 0 {
            info!(
                "Collection '{}' already holds {} documents, skipping seed",
                self.collection, existing
            );
            return Ok(SeedOutcome::SkippedNonEmpty(existing));
        }

        let documents = prompts
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let inserted = self
            .store
            .insert_documents(self.collection, documents)
            .await?;

        info!("Seeded {} prompts into '{}'", inserted, self.collection);
        Ok(SeedOutcome::Inserted(inserted))
    }
}
