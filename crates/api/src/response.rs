//! API response types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// Standard success response wrapper: a status code plus a `data` envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    status: StatusCode,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response.
    pub const fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 response for freshly created resources.
    pub const fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "data": self.data }))).into_response()
    }
}

/// Empty 204 response for deletions and other bodiless successes.
#[must_use]
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
