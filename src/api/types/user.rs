//! User request and response bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{User, UserStatus};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Body of `POST /api/v1/users`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserBody {
    #[validate(length(
        min = 1,
        max = 50,
        message = "user_name is required and at most 50 characters"
    ))]
    pub user_name: String,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "user_status is required"))]
    pub user_status: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl From<CreateUserBody> for CreateUserRequest {
    fn from(body: CreateUserBody) -> Self {
        Self {
            username: body.user_name,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            status: body.user_status,
            department: body.department,
        }
    }
}

/// Body of `PUT /api/v1/users`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateUserBody {
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
    #[validate(length(
        min = 1,
        max = 50,
        message = "user_name is required and at most 50 characters"
    ))]
    pub user_name: String,
    #[validate(length(min = 1, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last_name is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "user_status is required"))]
    pub user_status: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl From<UpdateUserBody> for UpdateUserRequest {
    fn from(body: UpdateUserBody) -> Self {
        Self {
            username: body.user_name,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            status: body.user_status,
            department: body.department,
        }
    }
}

/// `{user_id}` returned by create and update
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct UserIdResponse {
    pub user_id: i64,
}

/// User as sent on the wire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user_id: i64,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(value_type = String, example = "A")]
    pub user_status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().value(),
            user_name: user.username().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
            user_status: user.status(),
            department: user.department().map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{NewUser, UserId};

    fn body_json() -> serde_json::Value {
        serde_json::json!({
            "user_name": "johndoe",
            "first_name": "John",
            "last_name": "Doe",
            "email": "johndoe@email.com",
            "user_status": "A",
            "department": "IT"
        })
    }

    #[test]
    fn test_create_body_deserialization() {
        let body: CreateUserBody = serde_json::from_value(body_json()).unwrap();

        assert!(body.validate().is_ok());
        let request = CreateUserRequest::from(body);
        assert_eq!(request.username, "johndoe");
        assert_eq!(request.department, Some("IT".to_string()));
    }

    #[test]
    fn test_create_body_department_optional() {
        let mut json = body_json();
        json.as_object_mut().unwrap().remove("department");

        let body: CreateUserBody = serde_json::from_value(json).unwrap();
        assert!(body.department.is_none());
    }

    #[test]
    fn test_create_body_rejects_bad_email() {
        let mut json = body_json();
        json["email"] = serde_json::json!("not-an-email");

        let body: CreateUserBody = serde_json::from_value(json).unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn test_create_body_rejects_empty_required_field() {
        let mut json = body_json();
        json["first_name"] = serde_json::json!("");

        let body: CreateUserBody = serde_json::from_value(json).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_user_name_limited_to_column_width() {
        let mut json = body_json();
        json["user_name"] = serde_json::json!("x".repeat(51));
        json["user_id"] = serde_json::json!(1);

        let create: CreateUserBody = serde_json::from_value(json.clone()).unwrap();
        assert!(create.validate().unwrap_err().field_errors().contains_key("user_name"));

        let update: UpdateUserBody = serde_json::from_value(json).unwrap();
        assert!(update.validate().unwrap_err().field_errors().contains_key("user_name"));
    }

    #[test]
    fn test_update_body_requires_positive_id() {
        let mut json = body_json();
        json["user_id"] = serde_json::json!(0);

        let body: UpdateUserBody = serde_json::from_value(json).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
    }

    #[test]
    fn test_user_response_omits_absent_department() {
        let user = NewUser {
            username: "jdoe".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "jdoe@email.com".to_string(),
            status: UserStatus::Terminated,
            department: None,
        }
        .with_id(UserId::new(4));

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();

        assert_eq!(json["user_id"], 4);
        assert_eq!(json["user_status"], "T");
        assert!(json.get("department").is_none());
    }
}
