//! Infrastructure layer: item stores, the data access layer, config.

pub mod config;
pub mod repository;
pub mod store;

pub use config::{AppConfig, ConfigError, ErrorCodePolicy, StoreBackend};
pub use repository::{RepositoryError, TodoRepository};
pub use store::{InMemoryItemStore, ItemStore, PostgresItemStore, StoreError};
