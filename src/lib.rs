// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]
//!
//! ```
//! use mongo_init::{Config, MemoryStore, SchemaManager};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let config = Config::default_config();
//! let store = MemoryStore::new(&config.database.name);
//! let manager = SchemaManager::new(&store, &config.collections);
//!
//! let first = runtime.block_on(manager.initialize()).unwrap();
//! let second = runtime.block_on(manager.initialize()).unwrap();
//! assert_eq!(first.created().count(), 2);
//! assert!(second.is_noop());
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod utils;

pub use config::{CollectionsConfig, Config, DatabaseConfig, SeedConfig};
pub use database::{
    CollectionHealth, CollectionStore, HealthReport, HealthStatus, Maintenance, MemoryStore,
    MongoStore, SchemaManager, Seeder,
};
pub use error::{InitError, Result};
pub use models::{CollectionCount, EnsureOutcome, InitReport, SeedOutcome, SystemPrompt};
pub use utils::{OperationTimer, Validator};
