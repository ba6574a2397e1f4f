// file: src/database/mod.rs
// description: database operations module exports
// reference: internal module structure

pub mod client;
pub mod health;
pub mod maintenance;
pub mod memory;
pub mod schema;
pub mod seed;
pub mod store;

pub use client::MongoStore;
pub use health::{CollectionHealth, HealthReport, HealthStatus};
pub use maintenance::Maintenance;
pub use memory::MemoryStore;
pub use schema::SchemaManager;
pub use seed::Seeder;
pub use store::CollectionStore;
