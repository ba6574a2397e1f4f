// file: src/database/health.rs
// description: reachability and collection presence for the selected database

use crate::config::CollectionsConfig;
use crate::database::store::CollectionStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    fn icon(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "✓",
            HealthStatus::Degraded => "⚠",
            HealthStatus::Unhealthy => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionHealth {
    pub collection: String,
    pub exists: bool,
    pub status: HealthStatus,
    pub message: Option<String>,
}

impl CollectionHealth {
    pub fn new(collection: &str, status: HealthStatus, message: Option<String>) -> Self {
        Self {
            collection: collection.to_string(),
            exists: status == HealthStatus::Healthy,
            status,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub database: String,
    pub reachable: bool,
    pub status: HealthStatus,
    pub collections: Vec<CollectionHealth>,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Pings the server, then looks up each required collection. A missing
    /// collection degrades the report; an unreachable server fails it and
    /// leaves `collections` empty.
    pub async fn collect(store: &dyn CollectionStore, collections: &CollectionsConfig) -> Self {
        let database = store.database_name().to_string();

        if let Err(e) = store.ping().await {
            warn!("Database '{}' is unreachable: {}", database, e);
            return Self {
                database,
                reachable: false,
                status: HealthStatus::Unhealthy,
                collections: Vec::new(),
                error: Some(e.to_string()),
                checked_at: Utc::now(),
            };
        }

        let listed = store.list_collections().await;
        let checks: Vec<CollectionHealth> = collections
            .required()
            .into_iter()
            .map(|name| match &listed {
                Ok(names) if names.iter().any(|n| n == name) => {
                    CollectionHealth::new(name, HealthStatus::Healthy, None)
                }
                Ok(_) => CollectionHealth::new(
                    name,
                    HealthStatus::Degraded,
                    Some("missing, run `init`".to_string()),
                ),
                Err(e) => CollectionHealth::new(name, HealthStatus::Unhealthy, Some(e.to_string())),
            })
            .collect();

        let status = checks
            .iter()
            .map(|c| c.status)
            .max_by_key(|s| match s {
                HealthStatus::Healthy => 0,
                HealthStatus::Degraded => 1,
                HealthStatus::Unhealthy => 2,
            })
            .unwrap_or(HealthStatus::Healthy);
        debug!("Health of '{}': {:?}", database, status);

        Self {
            database,
            reachable: true,
            status,
            collections: checks,
            error: None,
            checked_at: Utc::now(),
        }
    }

    pub fn format(&self) -> String {
        let mut lines = vec![format!(
            "{} {} ({:?}) checked {}",
            self.status.icon(),
            self.database,
            self.status,
            self.checked_at.format("%Y-%m-%d %H:%M:%S UTC")
        )];

        if let Some(error) = &self.error {
            lines.push(format!("  unreachable: {}", error));
        }

        for check in &self.collections {
            let mut line = format!("  {} {}", check.status.icon(), check.collection);
            if let Some(message) = &check.message {
                line.push_str(&format!(": {}", message));
            }
            lines.push(line);
        }

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::database::MemoryStore;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_initialized_database_is_healthy() {
        let store = MemoryStore::with_collections("up_db", &["documents", "summaries"]);
        let collections = Config::default_config().collections;

        let report = HealthReport::collect(&store, &collections).await;

        assert_eq!(report.status, HealthStatus::Healthy);
        assert!(report.reachable);
        assert_eq!(
            report.collections,
            vec![
                CollectionHealth::new("documents", HealthStatus::Healthy, None),
                CollectionHealth::new("summaries", HealthStatus::Healthy, None),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_collection_degrades() {
        let store = MemoryStore::with_collections("up_db", &["documents"]);
        let collections = Config::default_config().collections;

        let report = HealthReport::collect(&store, &collections).await;

        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(!report.collections[1].exists);
        assert!(report.format().contains("⚠ summaries: missing"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unhealthy() {
        let store = MemoryStore::unreachable("up_db");
        let collections = Config::default_config().collections;

        let report = HealthReport::collect(&store, &collections).await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(!report.reachable);
        assert!(report.collections.is_empty());
        assert!(report.format().contains("unreachable"));
    }
}
