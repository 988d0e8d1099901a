//! OpenAPI document, served by Swagger UI at `/swagger`

use utoipa::OpenApi;

use super::health::{HealthCheck, HealthResponse, HealthStatus};
use super::types::{CreateUserBody, ErrorEnvelope, UpdateUserBody, UserIdResponse, UserResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Service API",
        description = "Create, read, update and delete user records."
    ),
    paths(
        crate::api::v1::users::create_user,
        crate::api::v1::users::list_users,
        crate::api::v1::users::get_user,
        crate::api::v1::users::update_user,
        crate::api::v1::users::delete_user,
        crate::api::health::health_check,
        crate::api::health::ready_check,
    ),
    components(schemas(
        CreateUserBody,
        UpdateUserBody,
        UserIdResponse,
        UserResponse,
        ErrorEnvelope,
        HealthResponse,
        HealthStatus,
        HealthCheck,
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
