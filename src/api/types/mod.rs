//! Request/response types and the JSON envelope

pub mod envelope;
pub mod error;
pub mod json;
pub mod user;

pub use envelope::{ApiSuccess, SuccessEnvelope};
pub use error::{ApiError, ErrorEnvelope};
pub use json::{Json, ValidatedJson};
pub use user::{CreateUserBody, UpdateUserBody, UserIdResponse, UserResponse};
