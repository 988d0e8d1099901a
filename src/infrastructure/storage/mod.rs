//! Storage infrastructure - backend selection and connection pooling

mod factory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use postgres::{PostgresConfig, connect};
