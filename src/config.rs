// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{InitError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Variables read by the ingestion, processing and summarizer services.
/// They win over every other source so all services agree on names.
const SERVICE_ENV: &[(&str, &str)] = &[
    ("MONGO_URI", "database.uri"),
    ("DATABASE_NAME", "database.name"),
    ("COLLECTION_NAME_DOCUMENTS", "collections.documents"),
    ("COLLECTION_NAME_SUMMARIES", "collections.summaries"),
];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub collections: CollectionsConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    pub connect_timeout_secs: u64,
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CollectionsConfig {
    pub documents: String,
    pub summaries: String,
}

impl CollectionsConfig {
    /// Required collections in creation order.
    pub fn required(&self) -> [&str; 2] {
        [self.documents.as_str(), self.summaries.as_str()]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub collection: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let service_env: Vec<(&str, Option<String>)> = SERVICE_ENV
            .iter()
            .map(|(var, key)| (*key, std::env::var(var).ok()))
            .collect();

        Self::load_with_overrides(path, &service_env)
    }

    pub(crate) fn load_with_overrides(
        path: Option<&Path>,
        overrides: &[(&str, Option<String>)],
    ) -> Result<Self> {
        let defaults = Self::default_config();

        let mut builder = config::Config::builder()
            .set_default("database.uri", defaults.database.uri)?
            .set_default("database.name", defaults.database.name)?
            .set_default(
                "database.connect_timeout_secs",
                defaults.database.connect_timeout_secs,
            )?
            .set_default("database.app_name", defaults.database.app_name)?
            .set_default("collections.documents", defaults.collections.documents)?
            .set_default("collections.summaries", defaults.collections.summaries)?
            .set_default("seed.enabled", defaults.seed.enabled)?
            .set_default("seed.collection", defaults.seed.collection)?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(
                config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
            ),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("MONGO_INIT")
                .separator("__")
                .try_parsing(true),
        );

        for (key, value) in overrides {
            builder = builder.set_override_option(*key, value.clone())?;
        }

        let settings = builder
            .build()
            .map_err(|e| InitError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| InitError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                name: "up_db".to_string(),
                connect_timeout_secs: 10,
                app_name: "mongo_init".to_string(),
            },
            collections: CollectionsConfig {
                documents: "documents".to_string(),
                summaries: "summaries".to_string(),
            },
            seed: SeedConfig {
                enabled: false,
                collection: "system_prompts".to_string(),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.connect_timeout_secs == 0 {
            return Err(InitError::Config(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Validator::validate_uri(&self.database.uri)?;
        Validator::validate_database_name(&self.database.name)?;

        let names = self.collections.required();
        for name in names {
            Validator::validate_collection_name(&self.database.name, name)?;
        }
        Validator::validate_distinct(&names)?;

        if self.seed.enabled {
            self.validate_seed()?;
        }

        Ok(())
    }

    /// Seed collection rules; `validate` applies them only while seeding is enabled.
    pub fn validate_seed(&self) -> Result<()> {
        let [documents, summaries] = self.collections.required();
        Validator::validate_collection_name(&self.database.name, &self.seed.collection)?;
        Validator::validate_distinct(&[documents, summaries, self.seed.collection.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn no_overrides() -> Vec<(&'static str, Option<String>)> {
        SERVICE_ENV.iter().map(|(_, key)| (*key, None)).collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.name, "up_db");
        assert_eq!(config.collections.required(), ["documents", "summaries"]);
        assert!(!config.seed.enabled);
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("init.toml");
        fs::write(
            &path,
            r#"
[database]
name = "staging_db"
connect_timeout_secs = 3

[collections]
summaries = "digests"
"#,
        )
        .unwrap();

        let config = Config::load_with_overrides(Some(&path), &no_overrides()).unwrap();
        assert_eq!(config.database.name, "staging_db");
        assert_eq!(config.database.connect_timeout_secs, 3);
        assert_eq!(config.database.uri, "mongodb://localhost:27017");
        assert_eq!(
            config.collections,
            CollectionsConfig {
                documents: "documents".to_string(),
                summaries: "digests".to_string(),
            }
        );
    }

    #[test]
    fn test_service_variables_override_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("init.toml");
        fs::write(&path, "[database]\nname = \"from_file\"\n").unwrap();

        let overrides = vec![
            ("database.uri", Some("mongodb://mongo:27017".to_string())),
            ("database.name", Some("from_env".to_string())),
            ("collections.documents", None),
            ("collections.summaries", None),
        ];

        let config = Config::load_with_overrides(Some(&path), &overrides).unwrap();
        assert_eq!(config.database.uri, "mongodb://mongo:27017");
        assert_eq!(config.database.name, "from_env");
        assert_eq!(config.collections.documents, "documents");
    }

    #[test]
    fn test_rejects_duplicate_collections() {
        let mut config = Config::default_config();
        config.collections.summaries = "documents".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seed_collection_ignored_while_seeding_is_off() {
        let mut config = Config::default_config();
        config.collections.documents = "system_prompts".to_string();
        assert!(config.validate().is_ok());
        assert!(config.validate_seed().is_err());

        config.seed.enabled = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.database.connect_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_database_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("init.toml");
        fs::write(&path, "[database]\nname = \"bad.name\"\n").unwrap();

        let result = Config::load_with_overrides(Some(&path), &no_overrides());
        assert!(matches!(result, Err(InitError::Validation(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load_with_overrides(
            Some(Path::new("/nonexistent/init.toml")),
            &no_overrides(),
        );
        assert!(matches!(result, Err(InitError::Config(_))));
    }
}
