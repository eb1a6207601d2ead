//! `PostgreSQL` adapter for task persistence.

mod config;
mod models;
mod repository;
mod schema;

pub use config::{PostgresConfigError, PostgresStoreConfig};
pub use repository::{PostgresTaskRepository, TaskPgPool};
