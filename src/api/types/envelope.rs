//! Success envelope: `{code, message, data?}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const SUCCESS: &str = "Success";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessEnvelope<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Successful response carrying its status code
#[derive(Debug)]
pub struct ApiSuccess<T> {
    pub status: StatusCode,
    pub body: SuccessEnvelope<T>,
}

impl<T> ApiSuccess<T> {
    fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            status,
            body: SuccessEnvelope {
                code: status.as_u16(),
                message: SUCCESS.to_string(),
                data,
            },
        }
    }

    /// 200 with data
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data))
    }

    /// 201 with data
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, Some(data))
    }
}

impl ApiSuccess<()> {
    /// 200 without a data field
    pub fn empty() -> Self {
        Self::new(StatusCode::OK, None)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_envelope() {
        let success = ApiSuccess::created(serde_json::json!({"user_id": 1}));

        assert_eq!(success.status, StatusCode::CREATED);
        let json = serde_json::to_value(&success.body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 201, "message": "Success", "data": {"user_id": 1}})
        );
    }

    #[test]
    fn test_empty_envelope_omits_data() {
        let success = ApiSuccess::empty();
        let json = serde_json::to_string(&success.body).unwrap();

        assert_eq!(json, r#"{"code":200,"message":"Success"}"#);
    }
}
