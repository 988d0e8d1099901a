//! User entity and related types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a user account, stored as a single-character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
    #[serde(rename = "T")]
    Terminated,
}

impl UserStatus {
    /// The one-character storage and wire code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Active => "A",
            Self::Inactive => "I",
            Self::Terminated => "T",
        }
    }

    /// Parse an exact storage code; long names are not accepted here
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::Active),
            "I" => Some(Self::Inactive),
            "T" => Some(Self::Terminated),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Canonical user record before storage has assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: UserStatus,
    pub department: Option<String>,
}

impl NewUser {
    /// Attach a storage-assigned id
    pub fn with_id(self, id: UserId) -> User {
        User { id, profile: self }
    }
}

/// Stored user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: NewUser,
}

impl User {
    pub fn new(id: UserId, profile: NewUser) -> Self {
        Self { id, profile }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn first_name(&self) -> &str {
        &self.profile.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.profile.last_name
    }

    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn status(&self) -> UserStatus {
        self.profile.status
    }

    pub fn department(&self) -> Option<&str> {
        self.profile.department.as_deref()
    }
}
