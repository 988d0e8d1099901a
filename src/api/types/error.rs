//! Error envelope and the mapping from domain errors to HTTP statuses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::user::ACCEPTED_STATUSES;
use crate::domain::DomainError;

/// Error body: `{code, message, details?}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorEnvelope,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorEnvelope {
                code: status.as_u16(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Add details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.response.details = Some(details.into());
        self
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Request body failed to parse or validate
    pub fn invalid_body(reason: impl std::fmt::Display) -> Self {
        Self::bad_request("Invalid body").with_details(format!("Invalid body: {}", reason))
    }

    /// Path parameter is not a number
    pub fn invalid_user_id(raw: &str) -> Self {
        Self::bad_request("Invalid user_id").with_details(format!(
            "user_id {:?} is not a valid user_id as it is not a number",
            raw
        ))
    }

    /// Map a domain error, describing the attempted action for unexpected failures
    ///
    /// Storage and configuration failures are logged and reported without
    /// their internal message.
    pub fn from_domain(err: DomainError, action: &str) -> Self {
        match err {
            DomainError::InvalidStatus { .. } => Self::bad_request("Incorrect Status")
                .with_details(format!("Accepted statuses are: {}", ACCEPTED_STATUSES)),
            DomainError::UserAlreadyExists { username }
            | DomainError::UsernameCollision { username } => {
                Self::bad_request("User already exists").with_details(format!(
                    "User with username {} already exists",
                    username
                ))
            }
            DomainError::Validation { message } => Self::invalid_body(message),
            DomainError::NotFound { message } => {
                Self::not_found("User not found").with_details(message)
            }
            err @ (DomainError::Storage { .. } | DomainError::Configuration { .. }) => {
                error!(error = %err, action, "Request failed");
                Self::internal("Internal Server Error")
                    .with_details(format!("Unexpected error trying to {}", action))
            }
        }
    }

    /// Map a domain error for single-user reads and deletes
    ///
    /// Storage faults are logged and reported as "User not found".
    pub fn from_lookup(err: DomainError, action: &str) -> Self {
        match err {
            err @ (DomainError::Storage { .. } | DomainError::Configuration { .. }) => {
                error!(error = %err, action, "Request failed");
                Self::not_found("User not found")
                    .with_details(format!("Unexpected error trying to {}", action))
            }
            other => Self::from_domain(other, action),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.response.message)
    }
}

impl std::error::Error for ApiError {}
