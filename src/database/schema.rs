// file: src/database/schema.rs
// description: ensures the required collections exist in the selected database
// reference: https://www.mongodb.com/docs/manual/reference/method/db.createCollection/

use crate::config::CollectionsConfig;
use crate::database::store::CollectionStore;
use crate::error::Result;
use crate::models::{EnsureOutcome, InitReport};
use crate::utils::validation::Validator;
use tracing::{info, warn};

pub struct SchemaManager<'a> {
    store: &'a dyn CollectionStore,
    collections: &'a CollectionsConfig,
}

impl<'a> SchemaManager<'a> {
    pub fn new(store: &'a dyn CollectionStore, collections: &'a CollectionsConfig) -> Self {
        Self { store, collections }
    }

    /// Creates `name` unless it is already listed. Never drops or alters
    /// an existing collection.
    pub async fn ensure_collection(&self, name: &str) -> Result<EnsureOutcome> {
        Validator::validate_collection_name(self.store.database_name(), name)?;

        if self.store.collection_exists(name).await? {
            info!("Collection '{}' already exists", name);
            return Ok(EnsureOutcome::AlreadyPresent);
        }

        let outcome = self.store.create_collection(name).await?;
        match outcome {
            EnsureOutcome::Created => info!("Created collection '{}'", name),
            EnsureOutcome::AlreadyPresent => {
                info!("Collection '{}' appeared while creating it", name)
            }
        }
        Ok(outcome)
    }

    /// Ensures the documents collection, then the summaries collection.
    pub async fn initialize(&self) -> Result<InitReport> {
        let database = self.store.database_name();
        info!("Initializing collections in database '{}'", database);

        let mut report = InitReport::new(database);
        for name in self.collections.required() {
            let outcome = self.ensure_collection(name).await?;
            report.record(name, outcome);
        }

        info!("Database '{}' initialized successfully", database);
        Ok(report)
    }

    pub async fn missing_collections(&self) -> Result<Vec<String>> {
        let existing = self.store.list_collections().await?;

        Ok(self
            .collections
            .required()
            .into_iter()
            .filter(|name| !existing.iter().any(|e| e == name))
            .map(str::to_string)
            .collect())
    }

    pub async fn verify_schema(&self) -> Result<bool> {
        let missing = self.missing_collections().await?;

        if missing.is_empty() {
            info!(
                "All required collections exist in '{}'",
                self.store.database_name()
            );
            return Ok(true);
        }

        for name in &missing {
            warn!("Collection '{}' does not exist", name);
        }
        Ok(false)
    }
}
