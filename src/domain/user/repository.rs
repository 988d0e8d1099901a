//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; `Err` is reserved for
/// storage faults and uniqueness violations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by their username (exact, case-sensitive match)
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// List all users ordered by ID
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Insert a new user and return the assigned ID
    async fn create(&self, user: &NewUser) -> Result<UserId, DomainError>;

    /// Overwrite every field of an existing user
    async fn update(&self, user: &User) -> Result<UserId, DomainError>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
