//! User domain
//!
//! This module provides the user entity, the status normalization rules and
//! the repository trait implemented by the storage adapters.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{ACCEPTED_STATUSES, normalize_department, normalize_status};

#[cfg(test)]
pub use repository::MockUserRepository;
