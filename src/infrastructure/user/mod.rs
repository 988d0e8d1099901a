//! User infrastructure module
//!
//! This module provides the user service and the storage adapters behind
//! the `UserRepository` trait: PostgreSQL for deployments and an in-memory
//! repository for development and tests.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
