// file: src/database/client.rs
// description: MongoDB client wrapper with connection management
// reference: https://docs.rs/mongodb

use crate::config::DatabaseConfig;
use crate::database::store::CollectionStore;
use crate::error::{InitError, Result};
use crate::models::EnsureOutcome;
use crate::utils::validation::Validator;
use async_trait::async_trait;
use mongodb::bson::{self, Document, doc};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Server error code for `createCollection` on an existing namespace.
const NAMESPACE_EXISTS: i32 = 48;

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
    config: DatabaseConfig,
}

impl MongoStore {
    /// Builds the client and selects the configured database. The driver
    /// connects lazily, so call [`CollectionStore::ping`] to verify reachability.
    pub async fn connect(config: DatabaseConfig) -> Result<Self> {
        info!(
            "Connecting to MongoDB at {}",
            Validator::redact_uri(&config.uri)
        );

        let mut options = ClientOptions::parse(config.uri.as_str()).await?;
        let timeout = Duration::from_secs(config.connect_timeout_secs);
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        debug!("Selected database {}", config.name);

        Ok(Self {
            client,
            database,
            config,
        })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.connect_timeout_secs)
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

fn is_namespace_exists(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Command(command) if command.code == NAMESPACE_EXISTS
    )
}

#[async_trait]
impl CollectionStore for MongoStore {
    fn database_name(&self) -> &str {
        &self.config.name
    }

    async fn ping(&self) -> Result<()> {
        debug!("Checking MongoDB connection");

        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| InitError::Connection {
                database: self.config.name.clone(),
                message: e.to_string(),
            })?;

        info!("MongoDB connection successful");
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let mut names = self.database.list_collection_names().await?;
        names.sort();
        Ok(names)
    }

    async fn create_collection(&self, name: &str) -> Result<EnsureOutcome> {
        match self.database.create_collection(name).await {
            Ok(()) => Ok(EnsureOutcome::Created),
            Err(e) if is_namespace_exists(&e) => {
                debug!("Collection {} created concurrently", name);
                Ok(EnsureOutcome::AlreadyPresent)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn count_documents(&self, name: &str) -> Result<u64> {
        Ok(self.collection(name).count_documents(doc! {}).await?)
    }

    async fn insert_documents(&self, name: &str, documents: Vec<Value>) -> Result<u64> {
        if documents.is_empty() {
            return Ok(0);
        }

        let documents = documents
            .iter()
            .map(|value| {
                bson::to_document(value).map_err(|e| InitError::Serialization(e.to_string()))
            })
            .collect::<Result<Vec<Document>>>()?;

        let result = self.collection(name).insert_many(documents).await?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn delete_all(&self, name: &str) -> Result<u64> {
        let result = self.collection(name).delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }
}
