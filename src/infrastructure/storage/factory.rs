//! Storage factory for runtime backend selection

use std::str::FromStr;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::postgres::{self, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Resolve the storage section of the application config
    ///
    /// The PostgreSQL backend requires a connection URL.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DomainError> {
        match config.storage.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(Self::InMemory),
            StorageType::Postgres => {
                let db = &config.database;
                let url = db.url.clone().filter(|u| !u.is_empty()).ok_or_else(|| {
                    DomainError::configuration(
                        "DATABASE_URL environment variable is required for the postgres backend",
                    )
                })?;

                Ok(Self::Postgres(PostgresConfig::from_settings(url, db)))
            }
        }
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Factory for creating user repositories
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the user repository selected by the configuration
    ///
    /// For PostgreSQL this connects the pool and creates the users table if
    /// it is missing.
    pub async fn create_user_repository(
        config: &StorageConfig,
    ) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryUserRepository::new())),
            StorageConfig::Postgres(pg_config) => {
                let pool = postgres::connect(pg_config).await?;
                let repository = PostgresUserRepository::new(pool);
                repository.ensure_schema().await?;
                Ok(Arc::new(repository))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>(), Ok(StorageType::InMemory));
        assert_eq!("In-Memory".parse::<StorageType>(), Ok(StorageType::InMemory));
        assert_eq!("postgres".parse::<StorageType>(), Ok(StorageType::Postgres));
        assert_eq!("pg".parse::<StorageType>(), Ok(StorageType::Postgres));
        assert!(matches!(
            "mysql".parse::<StorageType>(),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_storage_config_types() {
        let mut config = AppConfig::default();
        config.storage.backend = "memory".to_string();
        assert_eq!(
            StorageConfig::from_app_config(&config).unwrap().storage_type(),
            StorageType::InMemory
        );

        config.storage.backend = "postgres".to_string();
        config.database.url = Some("postgres://localhost/test".to_string());
        assert_eq!(
            StorageConfig::from_app_config(&config).unwrap().storage_type(),
            StorageType::Postgres
        );
    }

    #[test]
    fn test_empty_database_url_is_missing() {
        let mut config = AppConfig::default();
        config.database.url = Some(String::new());

        assert!(matches!(
            StorageConfig::from_app_config(&config),
            Err(DomainError::Configuration { .. })
        ));
    }

    #[test]
    fn test_postgres_requires_url() {
        let config = AppConfig::default();

        let result = StorageConfig::from_app_config(&config);
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_postgres_config_from_app_config() {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://db/users".to_string());
        config.database.max_connections = 3;

        match StorageConfig::from_app_config(&config).unwrap() {
            StorageConfig::Postgres(pg) => {
                assert_eq!(pg.url, "postgres://db/users");
                assert_eq!(pg.max_connections, 3);
            }
            StorageConfig::InMemory => panic!("Expected Postgres config"),
        }
    }

    #[tokio::test]
    async fn test_create_in_memory_repository() {
        let mut config = AppConfig::default();
        config.storage.backend = "memory".to_string();

        let storage = StorageConfig::from_app_config(&config).unwrap();
        let repository = StorageFactory::create_user_repository(&storage).await.unwrap();

        assert!(repository.list().await.unwrap().is_empty());
        assert!(repository.ping().await.is_ok());
    }
}
