//! User endpoint handlers

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, ApiSuccess, CreateUserBody, ErrorEnvelope, SuccessEnvelope, UpdateUserBody,
    UserIdResponse, UserResponse, ValidatedJson,
};
use crate::domain::user::UserId;

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>()
        .map_err(|_| ApiError::invalid_user_id(raw))
}

/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User created", body = SuccessEnvelope<UserIdResponse>),
        (status = 400, description = "Invalid body, status or duplicate username", body = ErrorEnvelope),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    ),
    tags = ["users"]
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserBody>,
) -> Result<ApiSuccess<UserIdResponse>, ApiError> {
    debug!(user_name = %body.user_name, "Creating user");

    let action = format!("create user {}", body.user_name);
    let id = state
        .user_service
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain(e, &action))?;

    Ok(ApiSuccess::created(UserIdResponse { user_id: id.value() }))
}

/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users", body = SuccessEnvelope<Vec<UserResponse>>),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    ),
    tags = ["users"]
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserResponse>>, ApiError> {
    debug!("Listing all users");

    let users = state
        .user_service
        .list()
        .await
        .map_err(|e| ApiError::from_domain(e, "list users"))?;

    Ok(ApiSuccess::ok(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/{user_id}
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "The user", body = SuccessEnvelope<UserResponse>),
        (status = 400, description = "Non-numeric user_id", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tags = ["users"]
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    let id = parse_user_id(&user_id)?;
    debug!(user_id = %id, "Getting user");

    let user = state
        .user_service
        .get(id)
        .await
        .map_err(|e| ApiError::from_lookup(e, &format!("get user {}", id)))?;

    Ok(ApiSuccess::ok(UserResponse::from(&user)))
}

/// PUT /api/v1/users
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "User updated", body = SuccessEnvelope<UserIdResponse>),
        (status = 400, description = "Invalid body, status or username collision", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope),
        (status = 500, description = "Storage failure", body = ErrorEnvelope)
    ),
    tags = ["users"]
)]
pub async fn update_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<UpdateUserBody>,
) -> Result<ApiSuccess<UserIdResponse>, ApiError> {
    let id = UserId::new(body.user_id);
    debug!(user_id = %id, user_name = %body.user_name, "Updating user");

    let updated = state
        .user_service
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain(e, &format!("update user {}", id)))?;

    Ok(ApiSuccess::ok(UserIdResponse {
        user_id: updated.value(),
    }))
}

/// DELETE /api/v1/users/{user_id}
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Non-numeric user_id", body = ErrorEnvelope),
        (status = 404, description = "User not found", body = ErrorEnvelope)
    ),
    tags = ["users"]
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let id = parse_user_id(&user_id)?;
    debug!(user_id = %id, "Deleting user");

    state
        .user_service
        .delete(id)
        .await
        .map_err(|e| ApiError::from_lookup(e, &format!("delete user {}", id)))?;

    Ok(ApiSuccess::empty())
}
