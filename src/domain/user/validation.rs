//! User normalization rules applied before persistence

use super::entity::UserStatus;
use crate::domain::DomainError;

/// Statuses accepted on input, in the order they are reported back to clients
pub const ACCEPTED_STATUSES: &str = "Active, A, Inactive, I, Terminated, T";

/// Normalize a user-supplied status into its canonical value
///
/// Rules:
/// - `A`, `I` and `T` are accepted as-is (case-sensitive)
/// - `active`, `inactive` and `terminated` are accepted in any case
/// - Anything else is rejected
pub fn normalize_status(input: &str) -> Result<UserStatus, DomainError> {
    if let Some(status) = UserStatus::from_code(input) {
        return Ok(status);
    }

    match input.to_lowercase().as_str() {
        "active" => Ok(UserStatus::Active),
        "inactive" => Ok(UserStatus::Inactive),
        "terminated" => Ok(UserStatus::Terminated),
        _ => Err(DomainError::invalid_status(input)),
    }
}

/// Empty department input means "no department"
pub fn normalize_department(input: Option<String>) -> Option<String> {
    input.filter(|d| !d.is_empty())
}
